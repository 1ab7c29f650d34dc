mod common;

use common::{cat, echo, EPS};
use hmmsuite::StateUniverse;

const CAT_STATES: [&str; 3] = ["happy", "grumpy", "hungry"];

#[test]
fn cat_meow_purr_matches_hand_sum() {
    let hmm = cat();
    let mut expected = 0.0;
    for s1 in CAT_STATES {
        for s2 in CAT_STATES {
            expected += hmm.transition("#", s1)
                * hmm.emission(s1, "meow")
                * hmm.transition(s1, s2)
                * hmm.emission(s2, "purr");
        }
    }
    let p = hmm.decoder(StateUniverse::Model).forward(&["meow", "purr"]);
    assert!((p - expected).abs() < EPS, "{p} != {expected}");
    assert!(p > 0.0);
}

#[test]
fn cat_observed_universe_sees_no_states() {
    // The tokens are symbols, not states, so the restricted universe finds nothing.
    let hmm = cat();
    assert_eq!(hmm.forward(&["meow", "purr"]), 0.0);
}

#[test]
fn impossible_first_observation_is_zero() {
    let hmm = cat();
    let decoder = hmm.decoder(StateUniverse::Model);
    assert_eq!(decoder.forward(&["hiss", "meow", "purr"]), 0.0);
}

#[test]
fn observed_universe_restricts_states() {
    let hmm = echo();
    // Only "a" is present, so paths through "b" are not counted.
    let restricted = hmm.forward(&["a", "a"]);
    assert!((restricted - 0.5 * 0.8 * 0.6 * 0.8).abs() < EPS);
    let full = hmm.decoder(StateUniverse::Model).forward(&["a", "a"]);
    assert!(full > restricted);
}

#[test]
fn universes_agree_when_all_states_are_observed() {
    let hmm = echo();
    let obs = ["b", "a", "a", "b"];
    let observed = hmm.forward(&obs);
    let model = hmm.decoder(StateUniverse::Model).forward(&obs);
    assert!((observed - model).abs() < EPS, "{observed} != {model}");
}

#[test]
fn lattice_is_inspectable() {
    let hmm = cat();
    let decoder = hmm.decoder(StateUniverse::Model);
    let lat = decoder.forward_lattice(&["silent", "meow"]);
    assert_eq!(lat.num_items(), 2);
    assert_eq!(lat.num_states(), 3);
    assert_eq!(
        decoder.state_names(&["silent", "meow"]),
        vec!["happy", "grumpy", "hungry"]
    );
    for (l, s) in CAT_STATES.iter().enumerate() {
        let alpha0 = hmm.transition("#", s) * hmm.emission(s, "silent");
        assert!((lat.score(0, l) - alpha0).abs() < EPS);
    }
    let total: f64 = lat.last_row().iter().sum();
    assert!((total - lat.total()).abs() < EPS);
}

#[test]
fn single_state_forward_equals_viterbi() {
    let mut b = hmmsuite::Hmm::builder();
    b.transition("#", "x", 0.7)
        .transition("x", "x", 0.9)
        .emission("x", "x", 0.4);
    let hmm = b.build().unwrap();
    let obs = ["x", "x", "x"];
    let forward = hmm.forward(&obs);
    let decoded = hmm.viterbi(&obs).unwrap();
    assert_eq!(decoded.states, ["x", "x", "x"]);
    assert!((forward - decoded.probability).abs() < EPS);
    assert!((forward - 0.7 * 0.4 * 0.9 * 0.4 * 0.9 * 0.4).abs() < EPS);
}

#[test]
fn empty_sequence_has_probability_one() {
    let hmm = cat();
    let empty: [&str; 0] = [];
    assert_eq!(hmm.forward(&empty), 1.0);
}

#[test]
fn forward_is_idempotent() {
    let hmm = cat();
    let decoder = hmm.decoder(StateUniverse::Model);
    let obs = ["meow", "silent", "purr", "purr", "meow"];
    let first = decoder.forward(&obs);
    let second = decoder.forward(&obs);
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn shared_model_across_threads() {
    let hmm = cat();
    let decoder = hmm.decoder(StateUniverse::Model);
    let obs = ["meow", "purr", "silent"];
    let expected = decoder.forward(&obs);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| hmm.decoder(StateUniverse::Model).forward(&obs)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().to_bits(), expected.to_bits());
        }
    });
}
