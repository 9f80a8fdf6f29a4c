#![no_main]

use libfuzzer_sys::fuzz_target;
use plangrid_core::geometry::Point;
use plangrid_core::momentum::MomentumProjector;
use plangrid_core::sampler::PointerSampler;

#[derive(arbitrary::Arbitrary, Debug)]
struct Input {
    factor: f64,
    max_axis_velocity: f64,
    min_dt_ms: f64,
    samples: Vec<(f64, f64, f64)>,
}

fuzz_target!(|input: Input| {
    let mut sampler = PointerSampler::with_min_dt_ms(input.min_dt_ms);
    let projector =
        MomentumProjector::new(input.factor).with_max_axis_velocity(input.max_axis_velocity);
    let bound = projector.max_displacement();

    for &(x, y, t) in input.samples.iter().take(256) {
        let v = sampler.record(Point::new(x, y), t);
        assert!(v.vx.is_finite() && v.vy.is_finite(), "non-finite velocity {v:?}");
        assert!(sampler.len() <= 2);

        let Some(last) = sampler.last_point() else {
            continue;
        };
        let d = projector.displacement(v);
        assert!(d.x.abs() <= bound && d.y.abs() <= bound, "displacement {d:?} > {bound}");
        let projected = projector.project(last, v);
        if last.is_finite() && (last + d).is_finite() {
            assert_eq!(projected, last + d);
        }
    }
});
