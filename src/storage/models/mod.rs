//! Row models: UserRecord, AlertRecord, CustomRecord.

mod alert_record;
mod custom_record;
mod user_record;

pub use alert_record::AlertRecord;
pub use custom_record::CustomRecord;
pub use user_record::UserRecord;
