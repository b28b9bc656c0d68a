use num_traits::Float;

pub fn norm_squared<T: Float>(v: &[T; 3]) -> T {
    v[0] * v[0] + v[1] * v[1] + v[2] * v[2]
}

/// `a + s * b`, component-wise
pub fn add_scaled<T: Float>(a: &[T; 3], s: T, b: &[T; 3]) -> [T; 3] {
    [a[0] + s * b[0], a[1] + s * b[1], a[2] + s * b[2]]
}

pub fn scale<T: Float>(s: T, v: &[T; 3]) -> [T; 3] {
    [s * v[0], s * v[1], s * v[2]]
}
