/// Earth angular velocity (rad.s⁻¹), as used by the Earth fixed frame model
pub const EARTH_ANGULAR_VEL_RAD: f64 = 7.2921151467E-5;

/// EGM96 Earth gravitational constant (m^3 s-2)
pub const EARTH_GRAVITATION_MU_M3_S2: f64 = 3.986004415E14;

/// EGM96 Earth equatorial radius (meters)
pub const EARTH_EQUATORIAL_RADIUS_M: f64 = 6378136.3;

/// EGM96 unnormalized J2 zonal coefficient
pub const EARTH_J2: f64 = 1.0826266835531513E-3;

/// Earth rotation angle at J2000 (fraction of revolution)
pub(crate) const ERA_J2000_REV: f64 = 0.7790572732640;

/// Earth rotation angle rate (revolution per UT1 day)
pub(crate) const ERA_RATE_REV_DAY: f64 = 1.00273781191135448;
