// Conversions: loaded configuration -> plugin inputs

use wxdep_config::WxdepConfig;
use wxdep_graph::{BuildContext, PluginOptions, Settings};

/// Plugin options for a resolved configuration.
pub fn plugin_options(config: &WxdepConfig) -> PluginOptions {
    PluginOptions::new(&config.output_dir)
        .with_wxss_suffixes(config.additional_wxss_suffixes.iter().cloned())
        .with_settings(Settings {
            cache_dir: config.cache_dir.clone(),
            app_manifest: config.app_manifest.clone(),
            app_level_files: config.app_level_files.clone(),
        })
}

/// Build context for a resolved configuration, aliases in config order.
pub fn build_context(config: &WxdepConfig) -> BuildContext {
    config
        .alias
        .iter()
        .fold(BuildContext::new(&config.src_dir), |context, alias| {
            context.with_alias(alias.symbol.clone(), alias.path.clone())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use wxdep_config::AliasEntry;

    fn resolved() -> WxdepConfig {
        let mut config = WxdepConfig::default();
        config.additional_wxss_suffixes = vec!["scss".to_string()];
        config.alias = vec![AliasEntry::new("@", "src"), AliasEntry::new("~", "lib")];
        config.resolve_paths(Path::new("/project"))
    }

    #[test]
    fn test_plugin_options_carry_locations() {
        let options = plugin_options(&resolved());
        assert_eq!(options.output_dir, Some(PathBuf::from("/project/dist")));
        assert_eq!(options.additional_wxss_suffixes, vec!["scss".to_string()]);
        assert_eq!(options.settings.cache_dir, PathBuf::from("/project/.wxdep"));
        assert_eq!(options.settings.app_manifest, "app.json");
    }

    #[test]
    fn test_build_context_keeps_alias_order() {
        let context = build_context(&resolved());
        assert_eq!(context.src_dir, Some(PathBuf::from("/project/src")));
        let symbols: Vec<_> = context.aliases.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["@", "~"]);
        assert_eq!(context.aliases[1].path, PathBuf::from("/project/lib"));
    }
}
