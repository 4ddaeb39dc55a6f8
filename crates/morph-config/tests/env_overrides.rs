use figment::Jail;
use morph_config::MorphConfig;

#[test]
fn env_fills_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("MORPH_STORAGE__DIR", "state");
        jail.set_env("MORPH_ANNOTATE__SKIP_HIDDEN", "false");

        let config = MorphConfig::figment_for(jail.directory())
            .extract::<MorphConfig>()
            .expect("config loads");
        assert_eq!(config.storage.dir, "state");
        assert!(!config.annotate.skip_hidden);
        Ok(())
    });
}

#[test]
fn unrelated_env_is_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("OTHERAPP_STORAGE__DIR", "elsewhere");

        let config = MorphConfig::load_from(jail.directory()).expect("config loads");
        assert_eq!(config.storage.dir, ".morph");
        Ok(())
    });
}
