use std::collections::HashMap;

/// 蔵書の集計結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statistics {
    /// 蔵書が1冊もない
    Empty,
    Summary {
        most_popular_genre: String,
        most_popular_year: String,
    },
}

impl Statistics {
    pub fn is_empty(&self) -> bool {
        matches!(self, Statistics::Empty)
    }

    pub fn most_popular_genre(&self) -> Option<&str> {
        match self {
            Statistics::Empty => None,
            Statistics::Summary {
                most_popular_genre, ..
            } => Some(most_popular_genre),
        }
    }

    pub fn most_popular_year(&self) -> Option<&str> {
        match self {
            Statistics::Empty => None,
            Statistics::Summary {
                most_popular_year, ..
            } => Some(most_popular_year),
        }
    }
}

/// 最頻値を返す純粋関数
///
/// 出現回数が同じ値が複数ある場合は、先に現れた値を選ぶ（安定）。
/// 入力が空の場合は`None`。
pub fn most_common<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    // 初出順の (値, 回数)
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for value in values {
        match positions.get(value) {
            Some(&pos) => {
                if let Some(entry) = counts.get_mut(pos) {
                    entry.1 += 1;
                }
            }
            None => {
                positions.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(&'a str, usize)>, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
        .map(|(value, _)| value)
}
