/// Upper bound (exclusive) for generated measurement values
pub const VALUE_RANGE: f64 = 100.0;

/// One synthetic row of the benchmark table.
///
/// `rowid` is only populated when a row is read back through SQLite's
/// implicit rowid access path; generated rows leave it `None` and let the
/// engine assign one on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRow {
    pub rowid: Option<i64>,
    pub key: String,
    pub num1: f64,
    pub num2: f64,
    pub num3: f64,
    pub num4: f64,
}

impl TestRow {
    /// The "update" every update workload applies: add 1.0 to each
    /// measurement column.
    pub fn bump(&mut self) {
        self.num1 += 1.0;
        self.num2 += 1.0;
        self.num3 += 1.0;
        self.num4 += 1.0;
    }
}

/// Generator for synthetic benchmark rows.
///
/// Measurement values are uniform in `[0, VALUE_RANGE)`. With a seed the
/// value stream is reproducible across runs.
pub struct RowGenerator {
    rng: fastrand::Rng,
}

impl RowGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { rng }
    }

    /// Next measurement value in `[0, VALUE_RANGE)`
    pub fn value(&mut self) -> f64 {
        self.rng.f64() * VALUE_RANGE
    }

    /// Row with a bare numeric key ("0", "1", ...), as used by the
    /// unprepared insert path
    pub fn bare(&mut self, index: u64) -> TestRow {
        self.row(index.to_string())
    }

    /// Row with a "K-" prefixed key ("K-0", "K-1", ...), as used by the
    /// transactional insert paths
    pub fn prefixed(&mut self, index: u64) -> TestRow {
        self.row(format!("K-{index}"))
    }

    fn row(&mut self, key: String) -> TestRow {
        TestRow {
            rowid: None,
            key,
            num1: self.value(),
            num2: self.value(),
            num3: self.value(),
            num4: self.value(),
        }
    }
}
