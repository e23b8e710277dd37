use super::*;

#[test]
fn clones_share_one_config() {
    let state = AppState::new(ServerConfig::default());
    let copy = state.clone();
    assert!(Arc::ptr_eq(&state.config, &copy.config));
    assert_eq!(copy.config.port, crate::config::DEFAULT_PORT);
}
