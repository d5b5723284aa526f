use serde::{Deserialize, Serialize};

/// `modules.orders_info` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrdersInfoConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Attempts at finding a free generated tracking id before giving up.
    #[serde(default = "default_tracking_id_attempts")]
    pub tracking_id_attempts: u32,
}

impl Default for OrdersInfoConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            tracking_id_attempts: default_tracking_id_attempts(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

fn default_tracking_id_attempts() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let cfg: OrdersInfoConfig =
            serde_json::from_value(serde_json::json!({ "max_page_size": 50 })).unwrap();
        assert_eq!(cfg.max_page_size, 50);
        assert_eq!(cfg.default_page_size, 10);
        assert_eq!(cfg.tracking_id_attempts, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<OrdersInfoConfig, _> =
            serde_json::from_value(serde_json::json!({ "page_size": 5 }));
        assert!(res.is_err());
    }
}
