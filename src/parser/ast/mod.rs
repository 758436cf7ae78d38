pub mod literal;
pub use literal::*;

pub mod clause_extractor;
pub use clause_extractor::*;

pub mod select_core;
pub use select_core::*;

pub mod field_list;
pub use field_list::*;

pub mod aggregate;
pub use aggregate::*;

pub mod condition;
pub use condition::*;

pub mod where_parser;
pub use where_parser::*;

pub mod join;
pub use join::*;

pub mod group_by;
pub use group_by::*;

pub mod order_by;
pub use order_by::*;

pub mod limit_parser;
pub use limit_parser::*;

pub mod select_query;
pub use select_query::*;

pub mod insert_query;
pub use insert_query::*;
