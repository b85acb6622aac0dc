//! Table rules and the reverse physical→logical table name lookup.

use shardgate_common::config::{ShardingConfig, TableRuleConfig};
use shardgate_common::error::{ProxyResult, ShardingError};
use shardgate_common::schema::DataSourceMetas;

use crate::data_node::DataNode;

/// One logical table and the physical data nodes it is sharded across.
#[derive(Debug, Clone)]
pub struct TableRule {
    logic_table: String,
    actual_data_nodes: Vec<DataNode>,
}

impl TableRule {
    /// Build from configuration, validating every data node against the
    /// known data sources.
    pub fn build(config: &TableRuleConfig, data_sources: &DataSourceMetas) -> ProxyResult<Self> {
        let mut actual_data_nodes = Vec::with_capacity(config.actual_data_nodes.len());
        for expr in &config.actual_data_nodes {
            let node = DataNode::parse(expr)?;
            if !data_sources.is_empty() && !data_sources.contains(&node.data_source) {
                return Err(ShardingError::UnknownDataSource {
                    node: expr.clone(),
                    data_source: node.data_source,
                }
                .into());
            }
            actual_data_nodes.push(node);
        }
        Ok(Self {
            logic_table: config.logic_table.clone(),
            actual_data_nodes,
        })
    }

    pub fn logic_table(&self) -> &str {
        &self.logic_table
    }

    pub fn actual_data_nodes(&self) -> &[DataNode] {
        &self.actual_data_nodes
    }

    /// Physical table names covered by this rule, in declaration order,
    /// first occurrence kept.
    pub fn actual_table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for node in &self.actual_data_nodes {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&node.table)) {
                names.push(&node.table);
            }
        }
        names
    }

    /// Whether this rule maps the given physical table (case-insensitive).
    pub fn covers_actual_table(&self, actual_table: &str) -> bool {
        self.actual_data_nodes
            .iter()
            .any(|n| n.table.eq_ignore_ascii_case(actual_table))
    }
}

/// The full sharding rule set for one logical schema. Deterministic and
/// pure: built once at schema load, read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct ShardingRule {
    table_rules: Vec<TableRule>,
}

impl ShardingRule {
    pub fn build(config: &ShardingConfig, data_sources: &DataSourceMetas) -> ProxyResult<Self> {
        let table_rules = config
            .tables
            .iter()
            .map(|t| TableRule::build(t, data_sources))
            .collect::<ProxyResult<Vec<_>>>()?;
        Ok(Self { table_rules })
    }

    pub fn table_rules(&self) -> &[TableRule] {
        &self.table_rules
    }

    pub fn find_table_rule(&self, logic_table: &str) -> Option<&TableRule> {
        self.table_rules
            .iter()
            .find(|r| r.logic_table.eq_ignore_ascii_case(logic_table))
    }

    /// Every logic table whose rule covers the given physical table, in
    /// rule-configuration order.
    pub fn logic_table_names_of(&self, actual_table: &str) -> Vec<&str> {
        self.table_rules
            .iter()
            .filter(|r| r.covers_actual_table(actual_table))
            .map(|r| r.logic_table.as_str())
            .collect()
    }

    /// Resolve a physical table name to its logical one.
    ///
    /// First configured mapping wins. A physical table governed by no rule
    /// resolves to itself, so unsharded and global tables pass through
    /// untouched. Cannot fail.
    pub fn logic_table_name<'a>(&'a self, actual_table: &'a str) -> &'a str {
        let candidates = self.logic_table_names_of(actual_table);
        match candidates.first() {
            Some(&first) => {
                if candidates.len() > 1 {
                    tracing::warn!(
                        actual_table = %actual_table,
                        logic_table = %first,
                        candidates = candidates.len(),
                        "physical table maps to multiple logic tables, using first configured"
                    );
                }
                first
            }
            None => actual_table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardgate_common::config::TableRuleConfig;
    use shardgate_common::error::ProxyError;
    use shardgate_common::schema::{DataSourceMetaData, DataSourceMetas};

    fn two_sources() -> DataSourceMetas {
        let mut sources = DataSourceMetas::new();
        sources.add("ds_0", DataSourceMetaData::parse("db0:3306/shard_0").unwrap());
        sources.add("ds_1", DataSourceMetaData::parse("db1:3306/shard_1").unwrap());
        sources
    }

    fn rule_config(logic_table: &str, nodes: &[&str]) -> TableRuleConfig {
        TableRuleConfig {
            logic_table: logic_table.to_string(),
            actual_data_nodes: nodes.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn order_rule() -> ShardingRule {
        let config = ShardingConfig {
            tables: vec![rule_config("t_logic_order", &["ds_0.t_order", "ds_1.t_order"])],
        };
        ShardingRule::build(&config, &two_sources()).unwrap()
    }

    #[test]
    fn test_build_table_rule() {
        let rule = order_rule();
        let table_rule = rule.find_table_rule("t_logic_order").unwrap();
        assert_eq!(table_rule.logic_table(), "t_logic_order");
        assert_eq!(table_rule.actual_data_nodes().len(), 2);
        assert_eq!(table_rule.actual_table_names(), vec!["t_order"]);
    }

    #[test]
    fn test_build_rejects_unknown_data_source() {
        let config = ShardingConfig {
            tables: vec![rule_config("t_order", &["ds_9.t_order_0"])],
        };
        match ShardingRule::build(&config, &two_sources()) {
            Err(ProxyError::Sharding(ShardingError::UnknownDataSource { data_source, .. })) => {
                assert_eq!(data_source, "ds_9");
            }
            other => panic!("Expected UnknownDataSource, got {other:?}"),
        }
    }

    #[test]
    fn test_build_skips_data_source_check_when_none_configured() {
        let config = ShardingConfig {
            tables: vec![rule_config("t_order", &["ds_0.t_order_0"])],
        };
        let rule = ShardingRule::build(&config, &DataSourceMetas::new()).unwrap();
        assert!(rule.find_table_rule("t_order").is_some());
    }

    #[test]
    fn test_logic_table_names_of_mapped_table() {
        let rule = order_rule();
        assert_eq!(rule.logic_table_names_of("t_order"), vec!["t_logic_order"]);
        assert_eq!(rule.logic_table_names_of("T_ORDER"), vec!["t_logic_order"]);
    }

    #[test]
    fn test_logic_table_name_resolves_mapped_table() {
        let rule = order_rule();
        assert_eq!(rule.logic_table_name("t_order"), "t_logic_order");
    }

    #[test]
    fn test_logic_table_name_identity_for_unmapped_table() {
        let rule = order_rule();
        assert_eq!(rule.logic_table_name("t_config"), "t_config");
        assert_eq!(ShardingRule::default().logic_table_name("t_order"), "t_order");
    }

    #[test]
    fn test_ambiguous_mapping_uses_first_configured() {
        let config = ShardingConfig {
            tables: vec![
                rule_config("t_logic_a", &["ds_0.t_shared"]),
                rule_config("t_logic_b", &["ds_1.t_shared"]),
            ],
        };
        let rule = ShardingRule::build(&config, &two_sources()).unwrap();
        assert_eq!(
            rule.logic_table_names_of("t_shared"),
            vec!["t_logic_a", "t_logic_b"]
        );
        assert_eq!(rule.logic_table_name("t_shared"), "t_logic_a");
    }

    #[test]
    fn test_find_table_rule_is_case_insensitive() {
        let rule = order_rule();
        assert!(rule.find_table_rule("T_LOGIC_ORDER").is_some());
        assert!(rule.find_table_rule("t_missing").is_none());
    }
}
