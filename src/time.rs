use crate::prelude::{Duration, Epoch, TimeScale};

/// Julian day of the J2000 reference epoch
const J2000_JDE_DAYS: f64 = 2_451_545.0;

/// Returns the J2000 reference [Epoch] (2000-01-01T12:00:00 TT),
/// origin of all time offsets exchanged on the wire.
pub fn j2000_epoch() -> Epoch {
    Epoch::from_gregorian_hms(2000, 1, 1, 12, 0, 0, TimeScale::TT)
}

/// Builds an [Epoch] from an offset in seconds relative to [j2000_epoch].
pub fn epoch_from_j2000_seconds(offset_s: f64) -> Epoch {
    j2000_epoch() + Duration::from_seconds(offset_s)
}

/// Expresses this [Epoch] as an offset in seconds relative to [j2000_epoch].
pub fn j2000_seconds(t: Epoch) -> f64 {
    (t - j2000_epoch()).to_seconds()
}

/// Days elapsed since J2000, UT1 being approximated by UTC.
pub(crate) fn ut1_days_since_j2000(t: Epoch) -> f64 {
    t.to_jde_utc_days() - J2000_JDE_DAYS
}
