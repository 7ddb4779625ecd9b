pub const SQL_TABLEN_ACT : &str = "ad_activity";
pub const SQL_TABLEN_USR : &str = "ad_user";

// CAREFUL: expected layout, checked against the db after schema creation;
// must stay in line with resources/schema.sql (column order included)
pub const SQL_COLUMNS_ACT : [&str; 4] = ["code", "type", "duration", "distance"];
pub const SQL_COLUMNS_USR : [&str; 2] = ["code", "name"];

// no ORDER BY; rows come back in natural storage order
pub const SQL_SELECT_ACT : &str =
"SELECT code, type, duration, distance FROM ad_activity";

pub const SQL_UPDATE_ACT : &str =
"UPDATE ad_activity SET duration = ?1, distance = ?2 WHERE code = ?3";

pub const SQL_SELECT_USR : &str =
"SELECT code, name FROM ad_user";

pub const SQL_DELETE_USR : &str =
"DELETE FROM ad_user WHERE code = ?1";

pub const SQL_TABLE_COLUMNS : &str =
"SELECT name FROM pragma_table_info(?1) ORDER BY cid";
