use rand::Rng;

/// 从候选集合中选出一个下标
///
/// 实现必须返回 `[0, len)` 内的下标，调用方保证 `len > 0`。
pub trait WinnerSelector: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// 默认实现：每次调用使用线程本地随机数生成器，均匀分布，不固定种子
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl WinnerSelector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// 固定下标（超出范围时取最后一个），用于测试
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl WinnerSelector for FixedSelector {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_selector_stays_in_range() {
        let selector = RandomSelector;
        for len in 1..50 {
            for _ in 0..20 {
                assert!(selector.pick(len) < len);
            }
        }
    }

    #[test]
    fn test_random_selector_reaches_every_index() {
        let selector = RandomSelector;
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[selector.pick(4)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_fixed_selector_clamps() {
        assert_eq!(FixedSelector(0).pick(3), 0);
        assert_eq!(FixedSelector(2).pick(3), 2);
        assert_eq!(FixedSelector(9).pick(3), 2);
    }
}
