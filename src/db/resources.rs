//! sql text shipped inside the binary, addressed by logical resource name

pub const SCHEMA_RESOURCE : &str = "/resources/schema.sql";
pub const SEED_RESOURCE   : &str = "/resources/seed.sql";

const RESOURCES : [(&str, &str); 2] = [
    (SCHEMA_RESOURCE, include_str!("../../resources/schema.sql")),
    (SEED_RESOURCE,   include_str!("../../resources/seed.sql")),
];

/// look up a bundled resource; `None` for unknown names
pub fn load(name : &str) -> Option<&'static str>
{
    RESOURCES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, text)| *text)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::db::queries::*;

    #[test]
    fn schema_creates_both_tables_if_absent()
    {
        let schema = load(SCHEMA_RESOURCE).unwrap();

        assert!(schema.contains(SQL_TABLEN_ACT));
        assert!(schema.contains(SQL_TABLEN_USR));
        assert_eq!(schema.matches("CREATE TABLE IF NOT EXISTS").count(), 2);
    }

    #[test]
    fn seed_contains_known_rows()
    {
        let seed = load(SEED_RESOURCE).unwrap();

        assert!(seed.contains("(1001, 'Running',   30,  5.0)"));
        assert!(seed.contains("(5, 'Ana')"));
    }

    #[test]
    fn unknown_resource_is_none()
    {
        assert!(load("/resources/missing.sql").is_none());
        assert!(load("schema.sql").is_none());
    }
}
