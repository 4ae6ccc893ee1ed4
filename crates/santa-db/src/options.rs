use std::fmt;
use std::str::FromStr;

use crate::error::DbError;

/// Settable columns of the config row. Each maps to a fixed statement, so
/// option names never reach SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    ConfirmationRequired,
}

impl ConfigOption {
    pub const ALL: [ConfigOption; 1] = [ConfigOption::ConfirmationRequired];

    pub fn column(self) -> &'static str {
        match self {
            ConfigOption::ConfirmationRequired => "confirmationRequired",
        }
    }

    pub(crate) fn update_sql(self) -> &'static str {
        match self {
            ConfigOption::ConfirmationRequired => "UPDATE config SET confirmationRequired = ?1",
        }
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for ConfigOption {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigOption::ALL
            .into_iter()
            .find(|opt| opt.column() == s)
            .ok_or_else(|| DbError::UnknownConfigOption(s.to_string()))
    }
}

/// Which users [`Database::get_all_users`](crate::Database::get_all_users) returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl UserFilter {
    /// `true` selects confirmed users only; `false` means no filter at all,
    /// not "inactive only".
    pub fn from_active_only(active_only: bool) -> Self {
        if active_only {
            UserFilter::Active
        } else {
            UserFilter::All
        }
    }

    pub(crate) fn select_sql(self) -> &'static str {
        match self {
            UserFilter::All => "SELECT nickname, id, active FROM users ORDER BY rowid",
            UserFilter::Active => {
                "SELECT nickname, id, active FROM users WHERE active = 1 ORDER BY rowid"
            }
            UserFilter::Inactive => {
                "SELECT nickname, id, active FROM users WHERE active = 0 ORDER BY rowid"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_option() {
        let opt: ConfigOption = "confirmationRequired".parse().unwrap();
        assert_eq!(opt, ConfigOption::ConfirmationRequired);
        assert_eq!(opt.to_string(), "confirmationRequired");
    }

    #[test]
    fn rejects_unknown_option() {
        let err = "confirmationRequired = 1; DROP TABLE users"
            .parse::<ConfigOption>()
            .unwrap_err();
        assert!(matches!(err, DbError::UnknownConfigOption(_)));
    }

    #[test]
    fn active_only_false_means_everyone() {
        assert_eq!(UserFilter::from_active_only(true), UserFilter::Active);
        assert_eq!(UserFilter::from_active_only(false), UserFilter::All);
        assert_eq!(UserFilter::default(), UserFilter::All);
    }
}
