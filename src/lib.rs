pub mod parser;
pub use parser::{
    parse_insert, parse_insert_with_config, parse_join, parse_join_with_config, parse_select,
    parse_select_with_config, parse_statement, parse_statement_with_config, ParseError, ParseErrorKind,
    ParserConfig, Statement,
};
pub use parser::ast::{Condition, ConditionOperator, InsertQuery, JoinKind, JoinSpec, OrderDirection, OrderSpec, SelectQuery};
