use crate::parser::WordComparer;

#[derive(Debug)]
pub struct QueryComparers {
    pub select: WordComparer,
    pub distinct: WordComparer,
    pub from: WordComparer,
    pub inner_join: WordComparer,
    pub left_join: WordComparer,
    pub right_join: WordComparer,
    pub on: WordComparer,
    pub r#where: WordComparer,
    pub group_by: WordComparer,
    pub order_by: WordComparer,
    pub limit: WordComparer,
    pub and: WordComparer,
    pub or: WordComparer,
    pub like: WordComparer,
    pub insert_into: WordComparer,
    pub values: WordComparer,
    pub returning: WordComparer,
}

impl Default for QueryComparers {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryComparers {
    pub fn new() -> Self {
        Self {
            select: WordComparer::new("SELECT").with_whitespace_postfix(),
            distinct: WordComparer::new("DISTINCT").with_whitespace_postfix(),
            from: WordComparer::new("FROM").with_whitespace_postfix().with_eof(),
            inner_join: WordComparer::new("INNER JOIN").with_whitespace_postfix().with_eof(),
            left_join: WordComparer::new("LEFT JOIN").with_whitespace_postfix().with_eof(),
            right_join: WordComparer::new("RIGHT JOIN").with_whitespace_postfix().with_eof(),
            on: WordComparer::new("ON").with_whitespace_postfix().with_eof(),
            r#where: WordComparer::new("WHERE").with_whitespace_postfix().with_eof(),
            group_by: WordComparer::new("GROUP BY").with_whitespace_postfix().with_eof(),
            order_by: WordComparer::new("ORDER BY").with_whitespace_postfix().with_eof(),
            limit: WordComparer::new("LIMIT").with_whitespace_postfix().with_eof(),
            and: WordComparer::new("AND").with_whitespace_postfix().with_eof(),
            or: WordComparer::new("OR").with_whitespace_postfix().with_eof(),
            like: WordComparer::new("LIKE").with_whitespace_postfix().with_eof(),
            insert_into: WordComparer::new("INSERT INTO").with_whitespace_postfix(),
            values: WordComparer::new("VALUES").with_whitespace_postfix().with_delimiter('('),
            returning: WordComparer::new("RETURNING").with_whitespace_postfix().with_eof(),
        }
    }
}
