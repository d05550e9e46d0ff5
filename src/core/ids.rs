use uuid::Uuid;

/// Source of identifiers for questions and options assembled in the editor.
///
/// Injected into the editing state machine so id assignment stays
/// deterministic under test.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Counter-backed generator producing `seq-1`, `seq-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequenceGenerator {
    counter: u64,
}

impl IdGenerator for SequenceGenerator {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("seq-{}", self.counter)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sequence_is_deterministic() {
        let mut ids = SequenceGenerator::default();
        assert_eq!(ids.next_id(), "seq-1");
        assert_eq!(ids.next_id(), "seq-2");
        assert_eq!(ids.next_id(), "seq-3");
    }

    #[test]
    fn test_uuids_are_distinct() {
        let mut ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
