use crate::error::EcefError;
use crate::geodesy::ReferenceEllipsoid;

/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// First eccentricity squared: 1 - (b/a)^2
    pub e2: f64,
}

impl Ellipsoid {
    /// Build from both axes.
    pub const fn from_axes(a: f64, b: f64) -> Self {
        let e2 = 1.0 - (b * b) / (a * a);
        Self { a, b, e2 }
    }

    /// Build from the semi-major axis and flattening.
    pub const fn from_flattening(a: f64, f: f64) -> Self {
        Self {
            a,
            b: a * (1.0 - f),
            e2: 2.0 * f - f * f,
        }
    }

    /// Build from the semi-major axis and eccentricity squared.
    ///
    /// `e2` is taken as-is. For `e2 > 1` the semi-minor axis is NaN.
    pub fn from_eccentricity_squared(a: f64, e2: f64) -> Self {
        Self {
            a,
            b: a * (1.0 - e2).sqrt(),
            e2,
        }
    }

    pub fn flattening(&self) -> f64 {
        1.0 - self.b / self.a
    }

    /// Get the first eccentricity (computed at runtime).
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

    /// Look up a preset by name, ignoring case.
    pub fn named(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|&(_, ellipsoid)| ellipsoid)
    }

    /// Parse a preset name ("WGS84") or a PROJ-style parameter list.
    ///
    /// Recognised parameters are `+ellps=<name>`, `+a=`, and one shape
    /// parameter out of `+b=`, `+es=` (alias `+e2=`), `+rf=` or `+f=`, checked
    /// in that order. Parameters that do not describe the ellipsoid
    /// (`+proj=geocent`, `+units=m`, ...) are skipped.
    pub fn from_user_string(s: &str) -> Result<Self, EcefError> {
        let s = s.trim();
        if !s.starts_with('+') {
            return Self::named(s)
                .ok_or_else(|| EcefError::InvalidEllipsoid(format!("unknown ellipsoid '{s}'")));
        }

        let mut params = ProjParams::default();
        for token in s.split_whitespace() {
            let Some(body) = token.strip_prefix('+') else {
                return Err(EcefError::InvalidEllipsoid(format!(
                    "expected '+key=value', got '{token}'"
                )));
            };
            let (key, value) = body.split_once('=').unwrap_or((body, ""));
            match key {
                "ellps" => {
                    params.base = Some(Self::named(value).ok_or_else(|| {
                        EcefError::InvalidEllipsoid(format!("unknown ellipsoid '{value}'"))
                    })?);
                }
                "a" => params.a = Some(parse_value(key, value)?),
                "b" => params.b = Some(parse_value(key, value)?),
                "es" | "e2" => params.es = Some(parse_value(key, value)?),
                "rf" => params.rf = Some(parse_value(key, value)?),
                "f" => params.f = Some(parse_value(key, value)?),
                _ => tracing::trace!(key, "ignoring non-ellipsoid parameter"),
            }
        }

        params.build()
    }
}

impl ReferenceEllipsoid for Ellipsoid {
    fn semi_major_axis(&self) -> f64 {
        self.a
    }

    fn eccentricity_squared(&self) -> f64 {
        self.e2
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        WGS84
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::from_axes(6_378_137.0, 6_356_752.314_245);
pub const GRS80: Ellipsoid = Ellipsoid::from_axes(6_378_137.0, 6_356_752.314_140);
/// IUGG mean earth radius as a sphere (e2 = 0).
pub const SPHERE: Ellipsoid = Ellipsoid::from_axes(6_371_008.8, 6_371_008.8);

const PRESETS: [(&str, Ellipsoid); 3] = [("WGS84", WGS84), ("GRS80", GRS80), ("sphere", SPHERE)];

#[derive(Default)]
struct ProjParams {
    base: Option<Ellipsoid>,
    a: Option<f64>,
    b: Option<f64>,
    es: Option<f64>,
    rf: Option<f64>,
    f: Option<f64>,
}

impl ProjParams {
    fn build(self) -> Result<Ellipsoid, EcefError> {
        let has_shape =
            self.b.is_some() || self.es.is_some() || self.rf.is_some() || self.f.is_some();
        if let (Some(base), None, false) = (self.base, self.a, has_shape) {
            return Ok(base);
        }

        let a = self
            .a
            .or(self.base.map(|e| e.a))
            .ok_or_else(|| EcefError::InvalidEllipsoid("missing semi-major axis 'a'".into()))?;

        if let Some(b) = self.b {
            Ok(Ellipsoid::from_axes(a, b))
        } else if let Some(es) = self.es {
            Ok(Ellipsoid::from_eccentricity_squared(a, es))
        } else if let Some(rf) = self.rf {
            Ok(Ellipsoid::from_flattening(a, 1.0 / rf))
        } else if let Some(f) = self.f {
            Ok(Ellipsoid::from_flattening(a, f))
        } else if let Some(base) = self.base {
            Ok(Ellipsoid::from_eccentricity_squared(a, base.e2))
        } else {
            Err(EcefError::InvalidEllipsoid(
                "missing shape parameter: one of 'b', 'es', 'rf' or 'f' is required".into(),
            ))
        }
    }
}

fn parse_value(key: &str, value: &str) -> Result<f64, EcefError> {
    value
        .parse::<f64>()
        .map_err(|e| EcefError::InvalidEllipsoid(format!("+{key}={value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_constants() {
        assert_relative_eq!(WGS84.a, 6_378_137.0);
        assert_relative_eq!(WGS84.e2, 0.006_694_379_990_14, epsilon = 1e-12);
        assert_relative_eq!(WGS84.eccentricity(), 0.081_819_190_842_622, epsilon = 1e-10);
        assert_relative_eq!(WGS84.flattening(), 1.0 / 298.257_223_563, epsilon = 1e-12);
    }

    #[test]
    fn test_grs80_close_to_wgs84() {
        // WGS84 and GRS80 differ only slightly
        assert_relative_eq!(WGS84.a, GRS80.a);
        assert!((WGS84.e2 - GRS80.e2).abs() < 1e-10);
    }

    #[test]
    fn test_sphere_has_no_eccentricity() {
        assert_eq!(SPHERE.e2, 0.0);
        assert_eq!(SPHERE.flattening(), 0.0);
    }

    #[test]
    fn test_constructors_agree() {
        let from_f = Ellipsoid::from_flattening(6_378_137.0, 1.0 / 298.257_223_563);
        let from_e2 = Ellipsoid::from_eccentricity_squared(WGS84.a, WGS84.e2);
        assert_relative_eq!(from_f.b, WGS84.b, epsilon = 1e-3);
        assert_relative_eq!(from_f.e2, WGS84.e2, epsilon = 1e-12);
        assert_relative_eq!(from_e2.b, WGS84.b, epsilon = 1e-6);
    }

    #[test]
    fn test_e2_not_validated() {
        let e = Ellipsoid::from_eccentricity_squared(1.0, 1.5);
        assert_eq!(e.e2, 1.5);
        assert!(e.b.is_nan());
    }

    #[test]
    fn test_named_is_case_insensitive() {
        assert_eq!(Ellipsoid::named("wgs84"), Some(WGS84));
        assert_eq!(Ellipsoid::named("GRS80"), Some(GRS80));
        assert_eq!(Ellipsoid::named("Sphere"), Some(SPHERE));
        assert_eq!(Ellipsoid::named("clrk66"), None);
    }

    #[test]
    fn test_parse_preset_name() {
        assert_eq!(Ellipsoid::from_user_string(" WGS84 ").unwrap(), WGS84);
        assert!(matches!(
            Ellipsoid::from_user_string("bessel"),
            Err(EcefError::InvalidEllipsoid(_))
        ));
    }

    #[test]
    fn test_parse_proj_params() {
        let e = Ellipsoid::from_user_string("+proj=geocent +a=6378137 +b=6356752.314245 +units=m")
            .unwrap();
        assert_eq!(e, WGS84);

        let e = Ellipsoid::from_user_string("+a=6378137 +rf=298.257223563").unwrap();
        assert_relative_eq!(e.e2, WGS84.e2, epsilon = 1e-12);

        let e = Ellipsoid::from_user_string("+a=1000 +es=0").unwrap();
        assert_eq!(e.b, 1000.0);

        let e = Ellipsoid::from_user_string("+ellps=GRS80").unwrap();
        assert_eq!(e, GRS80);
    }

    #[test]
    fn test_parse_ellps_with_override() {
        let e = Ellipsoid::from_user_string("+ellps=WGS84 +a=1.0").unwrap();
        assert_eq!(e.a, 1.0);
        assert_eq!(e.e2, WGS84.e2);
    }

    #[test]
    fn test_parse_missing_params() {
        let missing_shape = Ellipsoid::from_user_string("+a=6378137");
        assert!(matches!(missing_shape, Err(EcefError::InvalidEllipsoid(_))));

        let missing_a = Ellipsoid::from_user_string("+es=0.0066");
        assert!(matches!(missing_a, Err(EcefError::InvalidEllipsoid(_))));
    }

    #[test]
    fn test_parse_bad_number() {
        let err = Ellipsoid::from_user_string("+a=abc +b=1").unwrap_err();
        assert!(err.to_string().contains("+a=abc"), "{err}");
    }
}
