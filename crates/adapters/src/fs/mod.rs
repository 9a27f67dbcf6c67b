mod clock;
mod uploads;

pub use clock::SystemClock;
pub use uploads::FsImageUploader;
