// utility functions for bracket checking and grid generation

/// true when every '(' has a matching ')' and no ')' closes an unopened bracket
pub fn has_balanced_brackets(s: &str) -> bool {
    let mut depth: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Ordered grid from `start` to `end` (both included) with spacing `step`.
///
/// Points are computed as `start + i * step`, so the upper bound survives
/// floating-point drift that a running `x += step` accumulates.
pub fn stepped_range(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || end < start {
        return Vec::new();
    }
    let n_steps = ((end - start) / step + 1e-9).floor() as usize;
    (0..=n_steps).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_brackets() {
        assert!(has_balanced_brackets("(x+1)*(x-1)"));
        assert!(has_balanced_brackets("x"));
        assert!(!has_balanced_brackets("(x+1"));
        assert!(!has_balanced_brackets(")x("));
    }

    #[test]
    fn test_stepped_range_includes_both_ends() {
        let grid = stepped_range(-10.0, 10.0, 0.5);
        assert_eq!(grid.len(), 41);
        assert_eq!(grid[0], -10.0);
        assert_eq!(grid[20], 0.0);
        assert_eq!(grid[40], 10.0);
    }

    #[test]
    fn test_stepped_range_drifting_step() {
        // 0.1 is not representable, a running sum ends slightly above 1.0
        let grid = stepped_range(0.0, 1.0, 0.1);
        assert_eq!(grid.len(), 11);
        assert!((grid[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stepped_range_degenerate() {
        assert!(stepped_range(1.0, 0.0, 0.5).is_empty());
        assert!(stepped_range(0.0, 1.0, 0.0).is_empty());
        assert_eq!(stepped_range(2.0, 2.0, 0.5), vec![2.0]);
    }
}
