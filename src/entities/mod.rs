pub mod photo_avatar;
pub mod video;
pub mod video_temp;
pub mod voice;

pub use photo_avatar::Entity as PhotoAvatar;
pub use video::Entity as Video;
pub use video_temp::Entity as VideoTemp;
pub use voice::Entity as Voice;
