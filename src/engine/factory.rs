//! Build operators by object name.

use std::sync::Arc;

use crate::{
    dsp::random::SeedSource,
    engine::args::Atom,
    error::BuildError,
    graph::{
        dust::{Dust, Polarity},
        edge::Edge,
        gate2imp::GateToImpulse,
        glide::Glide,
        gray::GrayNoise,
        lag::Lag,
        minmax::MinMax,
        node::StreamOperator,
        rand::{RandFloat, RandInt},
        slew::Slew,
        sum::Sum,
        threshold::Threshold,
        zerocross::ZeroCross,
    },
};

/// Every name [`create`] understands.
pub const OBJECT_NAMES: &[&str] = &[
    Lag::NAME,
    Slew::NAME,
    Glide::NAME,
    MinMax::NAME,
    Sum::NAME,
    Threshold::NAME,
    ZeroCross::NAME,
    GateToImpulse::NAME,
    Edge::NAME,
    GrayNoise::NAME,
    Dust::NAME,
    Dust::BIPOLAR_NAME,
    RandFloat::NAME,
    RandInt::NAME,
];

/// Create an operator from its object name and creation arguments.
///
/// Random operators draw instance ids and default seeds from `seeds`.
pub fn create(
    name: &str,
    args: &[Atom],
    seeds: &Arc<SeedSource>,
) -> Result<Box<dyn StreamOperator>, BuildError> {
    let op: Box<dyn StreamOperator> = match name {
        Lag::NAME => Box::new(Lag::from_args(args)?),
        Slew::NAME => Box::new(Slew::from_args(args)?),
        Glide::NAME => Box::new(Glide::from_args(args)?),
        MinMax::NAME => Box::new(MinMax::from_args(args)?),
        Sum::NAME => Box::new(Sum::from_args(args)?),
        Threshold::NAME => Box::new(Threshold::from_args(args)?),
        ZeroCross::NAME => Box::new(ZeroCross::from_args(args)?),
        GateToImpulse::NAME => Box::new(GateToImpulse::from_args(args)?),
        Edge::NAME => Box::new(Edge::from_args(args)?),
        GrayNoise::NAME => Box::new(GrayNoise::from_args(args, seeds.clone())?),
        Dust::NAME => Box::new(Dust::from_args(args, seeds.clone(), Polarity::Unipolar)?),
        Dust::BIPOLAR_NAME => Box::new(Dust::from_args(args, seeds.clone(), Polarity::Bipolar)?),
        RandFloat::NAME => Box::new(RandFloat::from_args(args, seeds.clone())?),
        RandInt::NAME => Box::new(RandInt::from_args(args, seeds.clone())?),
        _ => {
            let err = BuildError::UnknownObject(name.to_string());
            log::error!("{err}");
            return Err(err);
        }
    };

    log::debug!("created [{}]", op.name());
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_builds_with_no_args() {
        let seeds = Arc::new(SeedSource::new());
        for &name in OBJECT_NAMES {
            let op = create(name, &[], &seeds).unwrap();
            assert_eq!(op.name(), name);
        }
    }

    #[test]
    fn unknown_name_fails() {
        let seeds = Arc::new(SeedSource::new());
        assert_eq!(
            create("reverb~", &[], &seeds).err(),
            Some(BuildError::UnknownObject("reverb~".to_string()))
        );
    }

    #[test]
    fn bad_args_are_reported() {
        let seeds = Arc::new(SeedSource::new());
        let args = [Atom::from("-seed"), Atom::Float(-3.0)];
        assert!(matches!(
            create("dust~", &args, &seeds),
            Err(BuildError::InvalidSeed { object: "dust~", .. })
        ));
        assert!(create("lag~", &[Atom::from("-seed"), Atom::Float(1.0)], &seeds).is_err());
    }

    #[test]
    fn generators_share_the_seed_source() {
        let seeds = Arc::new(SeedSource::new());
        create("gray~", &[], &seeds).unwrap();
        create("dust~", &[], &seeds).unwrap();
        assert_eq!(seeds.next_instance_id(), 3);
    }
}
