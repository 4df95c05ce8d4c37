use std::collections::HashMap;

/// Bidirectional index over environment groups.
///
/// Apigee routes traffic through environment groups: a group owns a set of
/// hostnames and attaches to one or more environments. The export pipeline
/// needs both directions — which hostnames serve an environment, and which
/// group a hostname belongs to — so the map is built once per organization
/// and queried during deployment resolution.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentMap {
    hostnames_by_env: HashMap<String, Vec<String>>,
    envgroup_by_hostname: HashMap<String, String>,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one environment group: its hostnames serve every attached
    /// environment, and each hostname resolves back to the group.
    pub fn insert_group(
        &mut self,
        envgroup: impl Into<String>,
        environments: &[String],
        hostnames: &[String],
    ) {
        let envgroup = envgroup.into();
        for environment in environments {
            self.hostnames_by_env
                .entry(environment.clone())
                .or_default()
                .extend(hostnames.iter().cloned());
        }
        for hostname in hostnames {
            self.envgroup_by_hostname
                .insert(hostname.clone(), envgroup.clone());
        }
    }

    /// The hostnames serving an environment, in group declaration order.
    /// `None` when no group attaches to the environment.
    pub fn hostnames(&self, environment: &str) -> Option<&[String]> {
        self.hostnames_by_env
            .get(environment)
            .map(Vec::as_slice)
    }

    /// The environment group a hostname belongs to, if known.
    pub fn envgroup(&self, hostname: &str) -> Option<&str> {
        self.envgroup_by_hostname.get(hostname).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hostnames_for_attached_environment() {
        let mut map = EnvironmentMap::new();
        map.insert_group(
            "default-group",
            &strings(&["test", "prod"]),
            &strings(&["api.example.com"]),
        );

        assert_eq!(
            map.hostnames("test"),
            Some(strings(&["api.example.com"]).as_slice())
        );
        assert_eq!(
            map.hostnames("prod"),
            Some(strings(&["api.example.com"]).as_slice())
        );
    }

    #[test]
    fn test_unknown_environment_is_none() {
        let map = EnvironmentMap::new();
        assert!(map.hostnames("staging").is_none());
    }

    #[test]
    fn test_envgroup_lookup() {
        let mut map = EnvironmentMap::new();
        map.insert_group(
            "edge",
            &strings(&["test"]),
            &strings(&["edge.example.com"]),
        );

        assert_eq!(map.envgroup("edge.example.com"), Some("edge"));
        assert!(map.envgroup("nobody.example.com").is_none());
    }

    #[test]
    fn test_multiple_groups_preserve_order() {
        let mut map = EnvironmentMap::new();
        map.insert_group("first", &strings(&["test"]), &strings(&["a.example.com"]));
        map.insert_group("second", &strings(&["test"]), &strings(&["b.example.com"]));

        assert_eq!(
            map.hostnames("test"),
            Some(strings(&["a.example.com", "b.example.com"]).as_slice())
        );
    }
}
