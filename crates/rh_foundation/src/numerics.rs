// crates/rh_foundation/src/numerics.rs

//! 数值工具
//!
//! - [`KahanSum`]: Kahan 补偿求和，减少浮点累加误差
//! - [`WeightedMean`]: 基于 Kahan 求和的加权平均 Σ(v·w) / Σw

/// Kahan 求和算法
///
/// # 示例
///
/// ```rust
/// use rh_foundation::numerics::KahanSum;
///
/// let mut sum = KahanSum::new();
/// for _ in 0..1000 {
///     sum.add(0.1);
/// }
/// assert!((sum.value() - 100.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// 创建新的求和器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个值
    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// 获取当前求和值
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }
}

/// 加权平均累加器
///
/// 分子 Σ(v·w) 与分母 Σw 分别用 Kahan 求和累加。
/// 权重总和为零时 [`WeightedMean::value`] 返回 `None`，由调用方决定如何报错。
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMean {
    numerator: KahanSum,
    weight: KahanSum,
}

impl WeightedMean {
    /// 创建空累加器
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一个 (值, 权重) 对
    #[inline]
    pub fn add(&mut self, value: f64, weight: f64) {
        self.numerator.add(value * weight);
        self.weight.add(weight);
    }

    /// 加权平均值
    pub fn value(&self) -> Option<f64> {
        let w = self.weight.value();
        if w == 0.0 {
            None
        } else {
            Some(self.numerator.value() / w)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kahan_sum() {
        let mut sum = KahanSum::new();
        for _ in 0..1000 {
            sum.add(0.1);
        }
        assert!((sum.value() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_mean() {
        let mut mean = WeightedMean::new();
        mean.add(98.0, 1.5);
        mean.add(60.0, 0.5);
        mean.add(79.0, 2.0);
        let expected = (98.0 * 1.5 + 60.0 * 0.5 + 79.0 * 2.0) / 4.0;
        assert!((mean.value().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_mean_zero_weight() {
        let mut mean = WeightedMean::new();
        assert!(mean.value().is_none());
        mean.add(42.0, 0.0);
        assert!(mean.value().is_none());
    }
}
