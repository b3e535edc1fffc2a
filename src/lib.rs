pub mod logger;
pub mod rubik_detector;
