use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Held-out features and targets loaded from `X_test.csv` / `y_test.csv`.
#[derive(Debug, Clone)]
pub struct TestSet {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl TestSet {
    pub fn load(features_path: &Path, targets_path: &Path) -> Result<Self> {
        let (feature_names, rows) = read_numeric_csv(features_path)?;
        let (_, target_rows) = read_numeric_csv(targets_path)?;

        let targets = target_rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                row.first()
                    .copied()
                    .with_context(|| format!("Empty target row {} in {:?}", i + 1, targets_path))
            })
            .collect::<Result<Vec<f64>>>()?;

        Self::new(feature_names, rows, targets)
    }

    pub fn new(feature_names: Vec<String>, rows: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Self> {
        if rows.len() != targets.len() {
            bail!(
                "Test set has {} feature rows but {} targets",
                rows.len(),
                targets.len()
            );
        }
        if rows.is_empty() {
            bail!("Test set is empty");
        }
        Ok(Self {
            feature_names,
            rows,
            targets,
        })
    }

    /// Rows with columns reordered to `order`. Every name in `order`
    /// must be a column of the test set.
    pub fn rows_in_order(&self, order: &[String]) -> Result<Vec<Vec<f64>>> {
        let indices = order
            .iter()
            .map(|name| {
                self.feature_names
                    .iter()
                    .position(|column| column == name)
                    .with_context(|| format!("Test set has no column '{}'", name))
            })
            .collect::<Result<Vec<usize>>>()?;

        Ok(self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i]).collect())
            .collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub(crate) fn read_numeric_csv(path: &Path) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("Failed to read header of {:?}", path))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Malformed row {} in {:?}", i + 1, path))?;
        let row = record
            .iter()
            .map(|field| {
                field.trim().parse::<f64>().with_context(|| {
                    format!("Non-numeric value '{}' in row {} of {:?}", field, i + 1, path)
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok((headers, rows))
}
