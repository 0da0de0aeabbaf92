// ============================================================================
// LocaleRelay - 插值占位符编解码
// ============================================================================
//
// 文件: src/core/placeholder.rs
// 职责: 在文本发送给外部翻译服务前后保护 %{name} 插值
// 边界:
//   - ✅ %{...} 插值的提取与替换（非贪婪，逐个匹配）
//   - ✅ VAR{i} 替身的大小写不敏感还原
//   - ❌ 不应包含网络请求
//   - ❌ 不应跨调用共享状态
//
// ============================================================================

use regex::Regex;
use std::sync::OnceLock;

/// 插值匹配：`%{` 与最近的 `}` 之间的内容
fn interpolation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"%\{.*?\}").expect("valid interpolation pattern"))
}

/// 替身匹配：VAR 后跟一段数字，序号可能只占其中的前缀
fn stand_in_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)var([0-9]+)").expect("valid stand-in pattern"))
}

/// 还原方案搜索的节点上限，超出后使用已找到的最优方案
const SEARCH_BUDGET: usize = 10_000;

/// 替身文本
pub fn stand_in(index: usize) -> String {
    format!("VAR{}", index)
}

/// 单次翻译调用中提取出的原始插值，按出现顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders(Vec<String>);

impl Placeholders {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// 将 `VAR{i}` 还原为第 i 个原始插值
    ///
    /// 替身后紧跟的数字（`%{count}5` 编码为 `VAR05`）使序号有歧义，因此
    /// 每段数字的前缀都是候选。选择还原数量最多的方案；数量相同时取与
    /// 原始顺序最接近的方案。每个序号只还原一次；翻译服务丢失的替身
    /// 保持未还原，不会报错。
    pub fn decode(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }

        // 在翻译结果上一次性定位，避免还原后的插值被再次匹配
        let stand_ins = self.locate(text);
        let choices = Assignment::solve(&stand_ins, self.0.len());

        let mut restored = String::with_capacity(text.len());
        let mut last = 0;
        for (stand_in, choice) in stand_ins.iter().zip(choices) {
            let Some(choice) = choice else {
                continue;
            };
            let (index, end) = stand_in.candidates[choice];
            restored.push_str(&text[last..stand_in.start]);
            restored.push_str(&self.0[index]);
            last = end;
        }

        restored.push_str(&text[last..]);
        restored
    }

    fn locate(&self, text: &str) -> Vec<StandIn> {
        stand_in_pattern()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let digits = caps.get(1)?;
                let candidates: Vec<(usize, usize)> = (1..=digits.len())
                    .rev()
                    .filter_map(|len| {
                        let prefix = &digits.as_str()[..len];
                        if len > 1 && prefix.starts_with('0') {
                            return None;
                        }
                        let index = prefix.parse::<usize>().ok()?;
                        (index < self.0.len()).then_some((index, digits.start() + len))
                    })
                    .collect();

                (!candidates.is_empty()).then_some(StandIn {
                    start: whole.start(),
                    candidates,
                })
            })
            .collect()
    }
}

/// 翻译结果中的一个替身
struct StandIn {
    start: usize,
    /// (序号, 替身结束位置)，数字前缀从长到短
    candidates: Vec<(usize, usize)>,
}

/// 替身到序号的分配搜索
struct Assignment<'a> {
    stand_ins: &'a [StandIn],
    claimed: Vec<bool>,
    assigned: Vec<usize>,
    current: Vec<Option<usize>>,
    best: Vec<Option<usize>>,
    /// (还原数量, 逆序对数量)
    best_score: Option<(usize, usize)>,
    budget: usize,
}

impl<'a> Assignment<'a> {
    /// 每个替身选中的候选下标，`None` 表示不还原
    fn solve(stand_ins: &'a [StandIn], count: usize) -> Vec<Option<usize>> {
        let mut search = Self {
            stand_ins,
            claimed: vec![false; count],
            assigned: Vec::new(),
            current: vec![None; stand_ins.len()],
            best: vec![None; stand_ins.len()],
            best_score: None,
            budget: SEARCH_BUDGET,
        };
        search.visit(0, 0);
        search.best
    }

    fn visit(&mut self, position: usize, inversions: usize) {
        // 第一条路径总会走完，保证至少有一个方案
        if self.budget == 0 && self.best_score.is_some() {
            return;
        }
        self.budget = self.budget.saturating_sub(1);

        let claims = self.assigned.len();
        if let Some((best_claims, best_inversions)) = self.best_score {
            let reachable = claims + (self.stand_ins.len() - position);
            if reachable < best_claims
                || (reachable == best_claims && inversions >= best_inversions)
            {
                return;
            }
        }

        if position == self.stand_ins.len() {
            self.best_score = Some((claims, inversions));
            self.best.clone_from(&self.current);
            return;
        }

        let stand_ins = self.stand_ins;
        let candidates = &stand_ins[position].candidates;
        for (choice, &(index, _)) in candidates.iter().enumerate() {
            if self.claimed[index] {
                continue;
            }
            let added = self.assigned.iter().filter(|&&other| other > index).count();

            self.claimed[index] = true;
            self.assigned.push(index);
            self.current[position] = Some(choice);
            self.visit(position + 1, inversions + added);
            self.current[position] = None;
            self.assigned.pop();
            self.claimed[index] = false;
        }

        self.visit(position + 1, inversions);
    }
}

/// 用 `VAR{i}` 替换文本中的每个插值
pub fn encode(text: &str) -> (String, Placeholders) {
    let mut originals = Vec::new();

    let encoded = interpolation_pattern().replace_all(text, |caps: &regex::Captures| {
        let index = originals.len();
        originals.push(caps[0].to_string());
        stand_in(index)
    });

    (encoded.into_owned(), Placeholders(originals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_interpolations_is_untouched() {
        let (encoded, placeholders) = encode("Hello world");
        assert_eq!(encoded, "Hello world");
        assert!(placeholders.is_empty());
        assert_eq!(placeholders.decode("Hola mundo"), "Hola mundo");
    }

    #[test]
    fn encodes_each_token_separately() {
        let (encoded, placeholders) = encode("hello %{name}, welcome to %{place}");
        assert_eq!(encoded, "hello VAR0, welcome to VAR1");
        assert_eq!(placeholders.as_slice(), ["%{name}", "%{place}"]);
    }

    #[test]
    fn round_trip_restores_the_original() {
        for text in [
            "plain",
            "It looks like your timezone is %{zone_name}",
            "%{a}%{b} and %{c}",
            "%{count} of %{total} (%{percent}%)",
            "%{same} and %{same}",
            "%{count}5 items",
            "Error %{code}404",
        ] {
            let (encoded, placeholders) = encode(text);
            assert_eq!(placeholders.decode(&encoded), text);
        }

        // VAR1 后跟 0 与 VAR10 同形
        let text = "%{v0} %{v1}0 %{v2} %{v3} %{v4} %{v5} %{v6} %{v7} %{v8} %{v9} %{v10}";
        let (encoded, placeholders) = encode(text);
        assert_eq!(encoded, "VAR0 VAR10 VAR2 VAR3 VAR4 VAR5 VAR6 VAR7 VAR8 VAR9 VAR10");
        assert_eq!(placeholders.decode(&encoded), text);
    }

    #[test]
    fn trailing_digits_stay_after_the_restored_token() {
        let (_, placeholders) = encode("%{count}5 items");
        assert_eq!(placeholders.decode("VAR05 artículos"), "%{count}5 artículos");
        assert_eq!(placeholders.decode("var05"), "%{count}5");
    }

    #[test]
    fn ambiguous_digits_prefer_restoring_every_token() {
        let text: String = (0..11).map(|i| format!("%{{v{}}} ", i)).collect();
        let (_, placeholders) = encode(&text);

        // VAR10 在 VAR1 之前：只有把它读作序号 10 才能还原两者
        let decoded = placeholders.decode("VAR0 VAR10 VAR1");
        assert_eq!(decoded, "%{v0} %{v10} %{v1}");
    }

    #[test]
    fn decode_ignores_stand_in_case() {
        let (_, placeholders) = encode("hello %{Name}");
        assert_eq!(placeholders.decode("hola var0"), "hola %{Name}");
        assert_eq!(placeholders.decode("hola Var0!"), "hola %{Name}!");
    }

    #[test]
    fn decode_keeps_reordered_stand_ins_in_place() {
        let (_, placeholders) = encode("%{first} before %{second}");
        assert_eq!(
            placeholders.decode("VAR1 después de VAR0"),
            "%{second} después de %{first}"
        );
    }

    #[test]
    fn lost_stand_in_is_left_unrestored() {
        let (_, placeholders) = encode("%{a} %{b} %{c}");
        assert_eq!(placeholders.decode("VAR0 VAR2"), "%{a} %{c}");
    }

    #[test]
    fn restored_token_is_not_matched_again() {
        let (encoded, placeholders) = encode("%{var2} %{a} %{b}");
        assert_eq!(encoded, "VAR0 VAR1 VAR2");
        assert_eq!(placeholders.decode("VAR0 VAR1 VAR2"), "%{var2} %{a} %{b}");
    }

    #[test]
    fn short_index_does_not_match_longer_stand_in() {
        let text: String = (0..11).map(|i| format!("%{{v{}}} ", i)).collect();
        let (encoded, placeholders) = encode(&text);
        assert!(encoded.contains("VAR10"));

        let shuffled = "VAR10 VAR1 VAR0 VAR2 VAR3 VAR4 VAR5 VAR6 VAR7 VAR8 VAR9";
        let decoded = placeholders.decode(shuffled);
        assert!(decoded.starts_with("%{v10} %{v1} %{v0}"));
    }
}
