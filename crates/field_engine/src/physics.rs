//! Psychrometric relations for moist air.
//!
//! Everything here is a pure function of temperature, relative humidity,
//! and pressure. The aggregator uses the density and vapor-density
//! relations for air/water mass; ingestion uses the rest to derive the
//! metrics sensors don't report directly.
//!
//! Formulas: Magnus (Alduchov–Eskridge coefficients) for saturation vapor
//! pressure and dew point, ideal-gas partial pressures for density.

/// Standard atmospheric pressure in Pa.
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;

/// Specific gas constant of dry air, J/(kg·K).
const R_DRY: f64 = 287.058;

/// Specific gas constant of water vapor, J/(kg·K).
const R_VAPOR: f64 = 461.495;

/// Magnus coefficients over water.
const MAGNUS_A: f64 = 17.625;
const MAGNUS_B: f64 = 243.04;

/// Saturation vapor pressure in kPa at `t_c` °C.
pub fn saturation_vapor_pressure_kpa(t_c: f64) -> f64 {
  0.61094 * (MAGNUS_A * t_c / (MAGNUS_B + t_c)).exp()
}

/// Partial pressure of water vapor in Pa at `t_c` °C and `rh` percent.
pub fn vapor_pressure_pa(t_c: f64, rh: f64) -> f64 {
  saturation_vapor_pressure_kpa(t_c) * 1000.0 * (rh / 100.0)
}

/// Absolute humidity (vapor density) in g/m³.
pub fn absolute_humidity_g_m3(t_c: f64, rh: f64) -> f64 {
  let pv = vapor_pressure_pa(t_c, rh);
  let t_k = t_c + 273.15;
  pv / (R_VAPOR * t_k) * 1000.0
}

/// Dew point in °C (Magnus inversion).
///
/// `rh` is clamped to a small positive floor; ln(0) has no dew point.
pub fn dew_point_c(t_c: f64, rh: f64) -> f64 {
  let rh = (rh / 100.0).max(1e-6);
  let gamma = rh.ln() + MAGNUS_A * t_c / (MAGNUS_B + t_c);
  MAGNUS_B * gamma / (MAGNUS_A - gamma)
}

/// Vapor-pressure deficit in kPa.
pub fn vpd_kpa(t_c: f64, rh: f64) -> f64 {
  saturation_vapor_pressure_kpa(t_c) * (1.0 - rh / 100.0)
}

/// Density of moist air in kg/m³ at pressure `p_pa`.
///
/// Sum of the dry-air and vapor partial densities. Moist air is lighter
/// than dry air at the same temperature and pressure.
pub fn moist_air_density(t_c: f64, rh: f64, p_pa: f64) -> f64 {
  let t_k = t_c + 273.15;
  let pv = vapor_pressure_pa(t_c, rh);
  let pd = p_pa - pv;
  pd / (R_DRY * t_k) + pv / (R_VAPOR * t_k)
}
