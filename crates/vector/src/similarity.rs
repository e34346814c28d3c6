/// Cosine similarity between two equal-length vectors
///
/// Returns exactly 0.0 when either vector has zero magnitude. Accumulation
/// runs in f64 and the result is clamped into [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "callers check dimensions first");

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    similarity.clamp(-1.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_identical_vectors() {
        let v = vec![0.3, -1.2, 4.5, 0.01];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < EPSILON);
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_vector_is_exactly_zero() {
        let zero = vec![0.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&[1.0, 2.0, 3.0], &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = vec![0.9, 0.1, -0.4];
        let b = vec![0.2, 0.8, 0.5];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_magnitude_independent() {
        let a = vec![1.0, 2.0, 3.0];
        let scaled = vec![10.0, 20.0, 30.0];
        assert!((cosine_similarity(&a, &scaled) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_large_components_stay_bounded() {
        let a = vec![f32::MAX, f32::MAX];
        let b = vec![f32::MAX, 0.0];
        let similarity = cosine_similarity(&a, &b);
        assert!(similarity.is_finite());
        assert!((-1.0..=1.0).contains(&similarity));
    }

    #[test]
    fn test_reference_example() {
        let similarity = cosine_similarity(&[1.0, 0.0, 0.0], &[0.9, 0.1, 0.0]);
        assert!((similarity - 0.993_884).abs() < 1e-5);
    }
}
