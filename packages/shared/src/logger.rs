//! Logging setup utilities for the Hiroba chat binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are enabled by the default filter.
const WORKSPACE_CRATES: [&str; 3] = ["hiroba_shared", "hiroba_server", "hiroba_client"];

/// Build the default filter directive for the given binary and level.
///
/// Binary names use dashes (`hiroba-server`) while tracing targets use the
/// crate name with underscores, so the name is normalized here.
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets: Vec<String> = WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, default_log_level))
        .collect();
    if !WORKSPACE_CRATES.contains(&binary_target.as_str()) {
        targets.push(format!("{}={}", binary_target, default_log_level));
    }
    targets.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_workspace_crates() {
        // テスト項目: ワークスペースの全クレートにデフォルトレベルが設定される
        // given (前提条件):
        let binary_name = "hiroba-server";

        // when (操作):
        let directive = default_directive(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            directive,
            "hiroba_shared=debug,hiroba_server=debug,hiroba_client=debug"
        );
    }

    #[test]
    fn test_default_directive_appends_foreign_binary() {
        // テスト項目: ワークスペース外のバイナリ名はターゲットとして追加される
        // given (前提条件):
        let binary_name = "load-tester";

        // when (操作):
        let directive = default_directive(binary_name, "info");

        // then (期待する結果):
        assert!(directive.ends_with(",load_tester=info"));
    }
}
