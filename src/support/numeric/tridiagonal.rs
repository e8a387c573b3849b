/// Solves a tri-diagonal system in place with the Thomas algorithm.
///
/// Row `i` of the system reads `a[i]·x[i-1] + b[i]·x[i] + c[i]·x[i+1] = d[i]`;
/// `a[0]` and `c[n-1]` are ignored. On return `d` holds the solution and `c`
/// holds the modified super-diagonal.
///
/// No pivoting is done. The systems built by the radial conduction model are
/// diagonally dominant, so this is stable for them.
///
/// # Panics
///
/// Panics if the slices are empty or their lengths differ.
pub fn solve_tridiagonal(a: &[f64], b: &[f64], c: &mut [f64], d: &mut [f64]) {
    let n = d.len();
    assert!(n > 0, "tri-diagonal system must not be empty");
    assert!(
        a.len() == n && b.len() == n && c.len() == n,
        "tri-diagonal bands must all have length {n}"
    );

    c[0] /= b[0];
    d[0] /= b[0];

    // Forward elimination
    for i in 1..n {
        let denom = b[i] - a[i] * c[i - 1];
        c[i] /= denom;
        d[i] = (d[i] - a[i] * d[i - 1]) / denom;
    }

    // Back substitution
    for i in (0..n - 1).rev() {
        d[i] -= c[i] * d[i + 1];
    }
}
