use once_cell::sync::Lazy;
use regex::Regex;

static AGGREGATE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(COUNT|AVG|SUM|MIN|MAX)\s*\(").expect("aggregate call pattern is valid")
});

/// True when any field calls COUNT, AVG, SUM, MIN or MAX.
pub fn contains_aggregate_call(fields: &[String]) -> bool {
    fields.iter().any(|field| AGGREGATE_CALL.is_match(field))
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::contains_aggregate_call;

    fn fields(list: &[&str]) -> Vec<String> {
        list.iter().map(|field| field.to_string()).collect()
    }

    #[test]
    pub fn test_aggregate_calls() {
        assert!(contains_aggregate_call(&fields(&["COUNT(id)"])));
        assert!(contains_aggregate_call(&fields(&["name", "avg (age)"])));
        assert!(contains_aggregate_call(&fields(&["Max(a.price)"])));
        assert!(contains_aggregate_call(&fields(&["COUNT(*)"])));
    }

    #[test]
    pub fn test_not_aggregate_calls() {
        assert!(!contains_aggregate_call(&fields(&["count", "summary"])));
        assert!(!contains_aggregate_call(&fields(&["my_count(x)"])));
        assert!(!contains_aggregate_call(&fields(&["LOWER(name)"])));
        assert!(!contains_aggregate_call(&[]));
    }
}
