// WHY: sentence ranking only needs singular values and right vectors, so the
// decomposition runs as a symmetric eigenproblem on whichever Gram matrix
// (AᵀA or AAᵀ) is smaller; a long document then costs O(min(m, n)³) per
// sweep instead of a full pass over the term matrix for every column pair

use crate::error::SummarizeError;

const MAX_SWEEPS: usize = 60;
const TOLERANCE: f64 = 1e-12;

/// Thin singular value decomposition keeping only what sentence ranking uses
#[derive(Debug, Clone)]
pub struct ThinSvd {
    /// Singular values in descending order, `min(rows, cols)` of them
    pub singular_values: Vec<f64>,
    /// `right_vectors[i][j]` is component `j` of the `i`-th right singular vector
    pub right_vectors: Vec<Vec<f64>>,
}

/// Decompose a matrix given as columns of length `rows`
pub fn decompose(columns: Vec<Vec<f64>>, rows: usize) -> Result<ThinSvd, SummarizeError> {
    if columns.iter().flatten().any(|value| !value.is_finite()) {
        return Err(SummarizeError::NonFinite);
    }

    if rows < columns.len() {
        decompose_wide(&columns, rows)
    } else {
        decompose_tall(&columns)
    }
}

/// At least as many terms as sentences: eigenvectors of AᵀA are the right vectors
fn decompose_tall(columns: &[Vec<f64>]) -> Result<ThinSvd, SummarizeError> {
    let gram: Vec<Vec<f64>> = columns
        .iter()
        .map(|a| columns.iter().map(|b| dot(a, b)).collect())
        .collect();

    let eigen = symmetric_eigen(gram)?;
    let order = eigen.descending_order();

    Ok(ThinSvd {
        singular_values: order.iter().map(|&i| eigen.singular_value(i)).collect(),
        right_vectors: order.iter().map(|&i| eigen.vectors[i].clone()).collect(),
    })
}

/// More sentences than terms: eigenvectors of AAᵀ are the left vectors, and
/// each right vector follows as Aᵀu / σ
fn decompose_wide(columns: &[Vec<f64>], rows: usize) -> Result<ThinSvd, SummarizeError> {
    let mut gram = vec![vec![0.0; rows]; rows];
    for column in columns {
        for (r, &x) in column.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            for (s, &y) in column.iter().enumerate() {
                gram[r][s] += x * y;
            }
        }
    }

    let eigen = symmetric_eigen(gram)?;
    let order = eigen.descending_order();

    let mut singular_values = Vec::with_capacity(order.len());
    let mut right_vectors = Vec::with_capacity(order.len());
    for &i in &order {
        let sigma = eigen.singular_value(i);
        let left = &eigen.vectors[i];
        let right = columns
            .iter()
            .map(|column| if sigma > 0.0 { dot(left, column) / sigma } else { 0.0 })
            .collect();
        singular_values.push(sigma);
        right_vectors.push(right);
    }

    Ok(ThinSvd {
        singular_values,
        right_vectors,
    })
}

struct SymmetricEigen {
    values: Vec<f64>,
    /// `vectors[i]` belongs to `values[i]`
    vectors: Vec<Vec<f64>>,
    /// Eigenvalues at or below this are rounding residue
    negligible: f64,
}

impl SymmetricEigen {
    fn descending_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&a, &b| self.values[b].total_cmp(&self.values[a]));
        order
    }

    fn singular_value(&self, i: usize) -> f64 {
        let value = self.values[i];
        if value > self.negligible {
            value.sqrt()
        } else {
            0.0
        }
    }
}

/// Cyclic Jacobi eigenvalue iteration on a symmetric positive semidefinite matrix
fn symmetric_eigen(mut a: Vec<Vec<f64>>) -> Result<SymmetricEigen, SummarizeError> {
    let n = a.len();
    let mut vectors: Vec<Vec<f64>> = (0..n)
        .map(|j| (0..n).map(|i| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    let trace: f64 = (0..n).map(|i| a[i][i]).sum();
    // Entries this small are rounding residue of a rank-deficient matrix
    let negligible = trace * f64::EPSILON * n as f64;

    let mut converged = n < 2;
    for _ in 0..MAX_SWEEPS {
        if converged {
            break;
        }

        let mut rotated = false;
        for p in 0..n {
            for q in (p + 1)..n {
                let off = a[p][q];
                if off.abs() <= negligible
                    || off.abs() <= TOLERANCE * (a[p][p] * a[q][q]).abs().sqrt()
                {
                    continue;
                }
                rotated = true;

                let theta = (a[q][q] - a[p][p]) / (2.0 * off);
                let t = theta.signum() / (theta.abs() + (1.0 + theta * theta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                // JᵀAJ: rotate rows p and q, then columns p and q
                rotate(&mut a, p, q, c, s);
                for row in a.iter_mut() {
                    let (xp, xq) = (row[p], row[q]);
                    row[p] = c * xp - s * xq;
                    row[q] = s * xp + c * xq;
                }
                a[p][q] = 0.0;
                a[q][p] = 0.0;

                rotate(&mut vectors, p, q, c, s);
            }
        }

        if !rotated {
            converged = true;
        }
    }

    if !converged {
        return Err(SummarizeError::NoConvergence { sweeps: MAX_SWEEPS });
    }

    let values: Vec<f64> = (0..n).map(|i| a[i][i]).collect();
    if values.iter().any(|value| !value.is_finite()) {
        return Err(SummarizeError::NonFinite);
    }

    Ok(SymmetricEigen {
        values,
        vectors,
        negligible,
    })
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Replace vectors `p` and `q` by `c·p - s·q` and `s·p + c·q`
fn rotate(vectors: &mut [Vec<f64>], p: usize, q: usize, c: f64, s: f64) {
    let (head, tail) = vectors.split_at_mut(q);
    let vector_p = &mut head[p];
    let vector_q = &mut tail[0];
    for (x, y) in vector_p.iter_mut().zip(vector_q.iter_mut()) {
        let (xp, xq) = (*x, *y);
        *x = c * xp - s * xq;
        *y = s * xp + c * xq;
    }
}
