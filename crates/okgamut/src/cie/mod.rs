mod two_deg;

pub use two_deg::CIE_OBSERVER_2DEG_1931;
