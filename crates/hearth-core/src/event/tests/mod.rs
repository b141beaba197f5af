
use crate::event::EventPriority;

#[test]
fn test_event_priority_default() {
    assert_eq!(EventPriority::default(), EventPriority::Normal);
}

#[test]
fn test_event_priority_ordering() {
    assert!(EventPriority::Critical > EventPriority::High);
    assert!(EventPriority::High > EventPriority::Normal);
    assert!(EventPriority::Normal > EventPriority::Low);
}
