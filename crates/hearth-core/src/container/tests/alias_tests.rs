use crate::container::alias::AliasTable;
use crate::container::error::ContainerError;
use crate::kernel::error::Error;

#[test]
fn test_resolve_follows_one_hop() {
    let mut table = AliasTable::new();
    table.insert("db", "hearth.database").unwrap();
    table.insert("database", "hearth.database").unwrap();

    assert_eq!(table.resolve("db"), "hearth.database");
    assert_eq!(table.resolve("hearth.database"), "hearth.database");
    assert_eq!(table.resolve("unknown"), "unknown");
    assert!(table.is_alias("db"));
    assert!(!table.is_alias("hearth.database"));
    assert_eq!(table.aliases_for("hearth.database"), vec!["database", "db"]);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_repointing_overwrites() {
    let mut table = AliasTable::new();
    table.insert("cache", "hearth.cache.file").unwrap();
    table.insert("cache", "hearth.cache.memory").unwrap();
    assert_eq!(table.resolve("cache"), "hearth.cache.memory");
    assert_eq!(table.len(), 1);
}

#[test]
fn test_self_alias_rejected() {
    let mut table = AliasTable::new();
    assert!(matches!(
        table.insert("log", "log"),
        Err(Error::Container(ContainerError::SelfAlias { .. }))
    ));
    assert!(table.is_empty());
}

#[test]
fn test_frozen_table_is_read_only() {
    let mut table = AliasTable::new();
    table.insert("env", "hearth.env").unwrap();
    table.freeze();
    table.freeze();

    assert!(table.is_frozen());
    assert!(matches!(
        table.insert("config", "hearth.config"),
        Err(Error::Container(ContainerError::AliasTableFrozen { .. }))
    ));
    assert_eq!(table.resolve("env"), "hearth.env");
    assert_eq!(table.iter().collect::<Vec<_>>(), vec![("env", "hearth.env")]);
}

#[test]
fn test_alias_to_alias_is_canonicalised() {
    let mut table = AliasTable::new();
    table.insert("config", "hearth.config").unwrap();
    table.insert("cfg", "config").unwrap();

    assert_eq!(table.resolve("cfg"), "hearth.config");
    assert_eq!(table.aliases_for("hearth.config"), vec!["cfg", "config"]);
}

#[test]
fn test_aliases_follow_a_repointed_target() {
    let mut table = AliasTable::new();
    table.insert("db", "primary").unwrap();
    table.insert("primary", "hearth.database").unwrap();

    assert_eq!(table.resolve("db"), "hearth.database");
    assert_eq!(table.resolve("primary"), "hearth.database");
}

#[test]
fn test_alias_cycle_rejected() {
    let mut table = AliasTable::new();
    table.insert("a", "b").unwrap();
    assert!(matches!(
        table.insert("b", "a"),
        Err(Error::Container(ContainerError::SelfAlias { .. }))
    ));
    assert_eq!(table.resolve("a"), "b");
}
