#![allow(dead_code)]

use hmmsuite::Hmm;

pub const EPS: f64 = 1e-12;

/// The cat model with a uniform start distribution.
pub fn cat() -> Hmm {
    let third = 1.0 / 3.0;
    let mut b = Hmm::builder();
    b.transition("#", "happy", third)
        .transition("#", "grumpy", third)
        .transition("#", "hungry", third)
        .transition("happy", "happy", 0.5)
        .transition("happy", "grumpy", 0.1)
        .transition("happy", "hungry", 0.4)
        .transition("grumpy", "happy", 0.6)
        .transition("grumpy", "grumpy", 0.3)
        .transition("grumpy", "hungry", 0.1)
        .transition("hungry", "happy", 0.1)
        .transition("hungry", "grumpy", 0.6)
        .transition("hungry", "hungry", 0.3)
        .emission("happy", "silent", 0.2)
        .emission("happy", "meow", 0.3)
        .emission("happy", "purr", 0.5)
        .emission("grumpy", "silent", 0.5)
        .emission("grumpy", "meow", 0.4)
        .emission("grumpy", "purr", 0.1)
        .emission("hungry", "silent", 0.2)
        .emission("hungry", "meow", 0.6)
        .emission("hungry", "purr", 0.2);
    b.build().expect("cat model is valid")
}

/// Two states whose names double as observation symbols.
pub fn echo() -> Hmm {
    let mut b = Hmm::builder();
    b.transition("#", "a", 0.5)
        .transition("#", "b", 0.5)
        .transition("a", "a", 0.6)
        .transition("a", "b", 0.4)
        .transition("b", "b", 0.5)
        .transition("b", "a", 0.5)
        .emission("a", "a", 0.8)
        .emission("a", "b", 0.2)
        .emission("b", "b", 0.7)
        .emission("b", "a", 0.3);
    b.build().expect("echo model is valid")
}
