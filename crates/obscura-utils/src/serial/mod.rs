mod human_duration;

pub use self::human_duration::AsHumanDuration;
