//! Domain model (container records, naming convention, attachments, events, errors).
//!
//! ドメイン層は I/O を持たない。ランタイムやファイルシステムへのアクセスは
//! ports / impls 側に置き、ここでは「何を止めるか」「何を消すか」の判断だけを扱う。

pub mod attachment;
pub mod container;
pub mod errors;
pub mod events;

pub use self::attachment::{ATTACHMENTS_DIR, AttachmentFile, AttachmentPolicy};
pub use self::container::{
    ContainerRecord, DEFAULT_CONTAINER_PREFIX, NamingConvention, NamingConventionError,
};
pub use self::errors::{ErrorKind, MaintenanceError, RuntimeError};
pub use self::events::{EventLevel, MaintenanceEvent};
