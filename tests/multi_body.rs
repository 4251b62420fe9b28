//! Multi-body model over short integrations and randomized states.

mod common;

use approx::assert_relative_eq;
use aven_dynamics::state::{ROLL, STEER, VX, WHEEL_SPIN, YAW, YAW_RATE};
use aven_dynamics::{
    ControlInput, MbState, StState, WheelId, evaluate, initial_state, presets, vehicle_dynamics_mb,
};
use common::integrate_mb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn cruising_left_turn_stays_well_behaved() {
    let p = presets::FORD_ESCORT;
    let x0 = initial_state(&StState::from([0.0, 0.0, 0.0, 15.0, 0.0, 0.0, 0.0]), &p);
    let x = integrate_mb(x0, 0.5, ControlInput::new(0.15, 0.0), &p);

    assert!(x.iter().all(|v| v.is_finite()));
    assert_relative_eq!(x[STEER], 0.075, epsilon = 1e-9);
    assert!(x[1] > 0.0, "vehicle should drift left, y = {}", x[1]);
    assert!(x[YAW] > 0.0);
    assert!(x[YAW_RATE] > 0.0);
    assert_relative_eq!(x[VX], 15.0, epsilon = 0.2);
    for w in WheelId::ALL {
        assert_relative_eq!(x[w.spin_index()], 15.0 / p.geometry.r_w, max_relative = 0.05);
    }
    assert!(x[ROLL].abs() < 0.1);
}

#[test]
fn idle_vehicle_stays_put() {
    let p = presets::FORD_ESCORT;
    let x0 = initial_state(&StState::zeros(), &p);
    let x = integrate_mb(x0, 0.5, ControlInput::default(), &p);
    assert!(x.iter().all(|v| v.is_finite()));
    for i in [0, 1, STEER, VX, YAW, YAW_RATE] {
        assert_eq!(x[i], 0.0, "state {i}");
    }
    for w in WheelId::ALL {
        assert!(x[w.spin_index()] >= 0.0);
    }
}

#[test]
fn low_speed_branch_follows_cog_kinematics() {
    let p = presets::FORD_ESCORT;
    let x = initial_state(&StState::from([0.0, 0.0, 0.2, 0.05, 0.3, 0.0, 0.0]), &p);
    let u = ControlInput::new(0.1, 0.5);
    let f = vehicle_dynamics_mb(&x, u, &p);
    let ks = x.fixed_rows::<5>(0).into_owned();
    let expected = aven_dynamics::vehicle_dynamics_ks_cog(&ks, u, p.geometry.a, p.geometry.b, &p.limits);
    for i in 0..5 {
        assert_relative_eq!(f[i], expected[i], epsilon = 1e-12);
    }
}

#[test]
fn wheel_spin_never_goes_negative() {
    let p = presets::FORD_ESCORT;
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..500 {
        let st = StState::from([
            0.0,
            0.0,
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-5.0..30.0),
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-0.1..0.1),
        ]);
        let mut x: MbState = initial_state(&st, &p);
        for w in WheelId::ALL {
            x[w.spin_index()] = rng.gen_range(-20.0..100.0);
        }
        let u = ControlInput::new(rng.gen_range(-1.0..1.0), rng.gen_range(-15.0..15.0));

        let out = evaluate(&x, u, &p);
        for w in WheelId::ALL {
            let k = w.spin_index();
            assert!(out.state[k] >= 0.0);
            if x[k] < 0.0 {
                assert_eq!(out.state[k], 0.0);
                assert_eq!(out.derivative[k], 0.0);
            } else {
                assert_eq!(out.state[k], x[k]);
            }
        }
        // Everything outside the spin block passes through untouched.
        for i in (0..WHEEL_SPIN).chain(WHEEL_SPIN + 4..29) {
            assert_eq!(out.state[i], x[i]);
        }
    }
}

#[test]
fn batch_evaluation_across_threads() {
    let p = presets::FORD_ESCORT;
    let states: Vec<MbState> = (0..32)
        .map(|i| initial_state(&StState::from([0.0, 0.0, 0.01 * i as f64, 5.0 + i as f64, 0.0, 0.0, 0.0]), &p))
        .collect();
    let u = ControlInput::new(0.05, 1.0);

    let serial: Vec<MbState> = states.iter().map(|x| vehicle_dynamics_mb(x, u, &p)).collect();
    let parallel: Vec<MbState> = std::thread::scope(|scope| {
        let handles: Vec<_> = states
            .chunks(8)
            .map(|chunk| {
                let p = &p;
                scope.spawn(move || chunk.iter().map(|x| vehicle_dynamics_mb(x, u, p)).collect::<Vec<_>>())
            })
            .collect();
        handles.into_iter().flat_map(|h| h.join().expect("worker panicked")).collect()
    });

    assert_eq!(serial, parallel);
}
