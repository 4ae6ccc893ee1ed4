use serde::{Deserialize, Serialize};

/// Global bot settings. There is only ever one of these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Users must confirm participation before they are paired.
    pub confirmation_required: bool,
}

/// A registered participant. `nickname` is the logical key; `id` is the
/// identifier on the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub nickname: String,
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedUser {
    pub nickname: String,
}

/// One giver/receiver pairing. All pairs generated in the same run share
/// an `order_id` (a round).
///
/// Nicknames are not foreign keys: pairing history outlives the users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub nickname1: String,
    pub nickname2: String,
    pub order_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_uses_column_names() {
        let json = serde_json::to_value(Config { confirmation_required: true }).unwrap();
        assert_eq!(json, serde_json::json!({ "confirmationRequired": true }));
    }

    #[test]
    fn pair_uses_column_names() {
        let pair = Pair {
            nickname1: "alice".into(),
            nickname2: "bob".into(),
            order_id: 3,
        };
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "nickname1": "alice", "nickname2": "bob", "orderId": 3 })
        );

        let back: Pair = serde_json::from_value(json).unwrap();
        assert_eq!(back, pair);
    }
}
