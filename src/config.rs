use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::consts::SHADOW_BIAS;

/// When a shadow ray counts as blocked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShadowPolicy {
    /// Any surface anywhere along the shadow ray blocks the light, even one
    /// beyond the light itself.
    AnyHit,

    /// Only surfaces between the point and the light block it.
    NearerThanLight,
}

impl Default for ShadowPolicy {
    fn default() -> ShadowPolicy {
        ShadowPolicy::NearerThanLight
    }
}

impl FromStr for ShadowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<ShadowPolicy, String> {
        match s {
            "any-hit" => Ok(ShadowPolicy::AnyHit),
            "nearer-than-light" => Ok(ShadowPolicy::NearerThanLight),
            _ => Err(format!(
                "unknown shadow policy '{}' (expected any-hit or nearer-than-light)",
                s)),
        }
    }
}

impl fmt::Display for ShadowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShadowPolicy::AnyHit => write!(f, "any-hit"),
            ShadowPolicy::NearerThanLight => write!(f, "nearer-than-light"),
        }
    }
}

/// How the constant ambient term is accumulated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AmbientPolicy {
    /// Ambient is added once for every light that reaches the point. Scenes
    /// with several lights get brighter ambient.
    PerVisibleLight,

    /// Ambient is added a single time for every shaded hit.
    Once,
}

impl Default for AmbientPolicy {
    fn default() -> AmbientPolicy {
        AmbientPolicy::PerVisibleLight
    }
}

impl FromStr for AmbientPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<AmbientPolicy, String> {
        match s {
            "per-light" => Ok(AmbientPolicy::PerVisibleLight),
            "once" => Ok(AmbientPolicy::Once),
            _ => Err(format!(
                "unknown ambient policy '{}' (expected per-light or once)", s)),
        }
    }
}

impl fmt::Display for AmbientPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AmbientPolicy::PerVisibleLight => write!(f, "per-light"),
            AmbientPolicy::Once => write!(f, "once"),
        }
    }
}

/// Knobs for a render pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Worker threads. `None` uses rayon's global pool.
    pub threads: Option<usize>,

    pub shadow_policy: ShadowPolicy,
    pub ambient_policy: AmbientPolicy,

    /// How far a hit point is pushed along its normal before casting shadow
    /// rays.
    pub shadow_bias: f64,

    /// The color of rays which hit nothing.
    pub background: Color,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            threads: None,
            shadow_policy: Default::default(),
            ambient_policy: Default::default(),
            shadow_bias: SHADOW_BIAS,
            background: Color::black(),
        }
    }
}

#[test]
fn parse_policies() {
    assert_eq!("any-hit".parse::<ShadowPolicy>(), Ok(ShadowPolicy::AnyHit));
    assert_eq!("nearer-than-light".parse::<ShadowPolicy>(), Ok(ShadowPolicy::NearerThanLight));
    assert!("sometimes".parse::<ShadowPolicy>().is_err());

    assert_eq!("per-light".parse::<AmbientPolicy>(), Ok(AmbientPolicy::PerVisibleLight));
    assert_eq!("once".parse::<AmbientPolicy>(), Ok(AmbientPolicy::Once));
    assert!("twice".parse::<AmbientPolicy>().is_err());
}

#[test]
fn policies_display_as_parsed() {
    for p in [ShadowPolicy::AnyHit, ShadowPolicy::NearerThanLight].iter() {
        assert_eq!(p.to_string().parse::<ShadowPolicy>(), Ok(*p));
    }
}
