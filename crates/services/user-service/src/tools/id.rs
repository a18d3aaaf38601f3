//! UUIDv4 identifier tool.

use uuid::{Uuid, Version};

use domain::{IdError, IdTool};

/// Issues random UUIDs in canonical hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTool;

impl IdTool for UuidTool {
    fn generate(&self) -> Result<String, IdError> {
        Ok(Uuid::new_v4().to_string())
    }

    fn is_valid(&self, id: &str) -> bool {
        // Only the exact form generate() emits is accepted
        Uuid::parse_str(id).is_ok_and(|uuid| {
            uuid.get_version() == Some(Version::Random) && uuid.hyphenated().to_string() == id
        })
    }
}
