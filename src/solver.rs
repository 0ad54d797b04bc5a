// Fixed-step classical Runge-Kutta integration over any state that supports
// linear combination.

/// Any type that can be linearly combined: the state of an ODE and its derivative.
pub trait VectorSpace: Sized + Clone {
    // self + other
    fn add(&self, other: &Self) -> Self;

    // self * scalar
    fn scale(&self, scalar: f64) -> Self;
}

// Dynamic dimension, mostly useful for quick test systems.
impl VectorSpace for Vec<f64> {
    fn add(&self, other: &Self) -> Self {
        assert_eq!(self.len(), other.len(), "vector dimensions must match");
        self.iter().zip(other.iter())
            .map(|(a, b)| a + b)
            .collect()
    }

    fn scale(&self, scalar: f64) -> Self {
        self.iter().map(|x| x * scalar).collect()
    }
}

/// A first-order system `dy/dt = f(t, y)`.
pub trait OdeSystem<T: VectorSpace> {
    fn derivatives(&self, t: f64, y: &T) -> T;
}

/// Advances `y` by exactly `dt` with the classical 4-stage scheme and returns the new state.
///
/// Pure: the input state is never touched. Non-finite input or non-finite
/// derivatives propagate into the result unchanged.
pub fn rk4_step<T, S>(system: &S, t: f64, y: &T, dt: f64) -> T
where
    T: VectorSpace,
    S: OdeSystem<T> + ?Sized,
{
    // k1 = f(t, y)
    let k1 = system.derivatives(t, y);

    // k2 = f(t + dt/2, y + k1 * dt/2)
    let k2_state = y.add(&k1.scale(0.5 * dt));
    let k2 = system.derivatives(t + 0.5 * dt, &k2_state);

    // k3 = f(t + dt/2, y + k2 * dt/2)
    let k3_state = y.add(&k2.scale(0.5 * dt));
    let k3 = system.derivatives(t + 0.5 * dt, &k3_state);

    // k4 = f(t + dt, y + k3 * dt)
    let k4_state = y.add(&k3.scale(dt));
    let k4 = system.derivatives(t + dt, &k4_state);

    // y_{n+1} = y + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
    let delta = k1
        .add(&k2.scale(2.0))
        .add(&k3.scale(2.0))
        .add(&k4)
        .scale(dt / 6.0);

    y.add(&delta)
}
