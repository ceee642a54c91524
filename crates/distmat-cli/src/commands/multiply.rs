use std::fmt::Write as _;

use distmat_core::{
    Backend, Describe, Empirical, FromSamples, Limits, Moments, MultiplyJob, Numeric, Product,
    Result, Shape,
};
use log::info;

pub struct MultiplyCommandConfig<'a> {
    pub prefix_a: &'a str,
    pub rows_a: usize,
    pub cols_a: usize,
    pub prefix_b: &'a str,
    pub rows_b: usize,
    pub cols_b: usize,
    pub backend: &'a str,
    pub max_dim: usize,
    pub summary: bool,
    pub output_path: Option<&'a str>,
}

impl MultiplyCommandConfig<'_> {
    /// Range-check every extent, then check operand compatibility. No file is touched.
    fn job(&self) -> Result<MultiplyJob> {
        let limits = Limits::new(self.max_dim)?;
        let shape_a = Shape::new(
            limits.check("-m", self.rows_a)?,
            limits.check("-n", self.cols_a)?,
        );
        let shape_b = Shape::new(
            limits.check("-x", self.rows_b)?,
            limits.check("-y", self.cols_b)?,
        );
        MultiplyJob::new(self.prefix_a, shape_a, self.prefix_b, shape_b)
    }
}

pub fn run(cfg: MultiplyCommandConfig<'_>) -> Result<()> {
    let backend: Backend = cfg.backend.parse()?;
    let job = cfg.job()?;
    info!(
        "multiplying {} by {} with the {backend} backend",
        job.shape_a(),
        job.shape_b()
    );

    match backend {
        Backend::Empirical => execute::<Empirical>(&job, backend, &cfg),
        Backend::Moments => execute::<Moments>(&job, backend, &cfg),
    }
}

fn execute<T>(job: &MultiplyJob, backend: Backend, cfg: &MultiplyCommandConfig<'_>) -> Result<()>
where
    T: FromSamples + Numeric + Describe,
{
    let product = job.run::<T>()?;
    print!("{}", render(&product));

    if cfg.summary {
        print!("{}", render_summaries(&product));
    }

    if let Some(path) = cfg.output_path {
        super::report::write(path, backend, &product);
    }
    Ok(())
}

/// Operand and result matrices under their headers.
pub fn render<T: Numeric>(product: &Product<T>) -> String {
    format!(
        "A =\n{}B =\n{}result =\n{}",
        product.a, product.b, product.result
    )
}

/// One line per result entry: index, mean ± std dev, 90% interval.
pub fn render_summaries<T: Describe>(product: &Product<T>) -> String {
    let mut out = String::from("\nresult summary (mean ± std dev [5%, 95%]):\n");
    let summaries = product.result.summaries();
    for (i, row) in summaries.iter_rows().enumerate() {
        for (j, s) in row.iter().enumerate() {
            let _ = writeln!(out, "  [{i},{j}] {s}");
        }
    }
    out
}
