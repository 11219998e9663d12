use super::*;

#[test]
fn connection_starts_disconnected() {
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Disconnected);
}
