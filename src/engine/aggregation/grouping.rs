// ==========================================
// 生产需求计划系统 - 汇总分组工具
// ==========================================
// 职责: 保序分组 + 规范化分组键
// 红线: 平台只按 ID 分组，禁止用名称兜底（同名不同平台会被合并）
// ==========================================

use crate::domain::request::ProductionRequest;
use std::collections::HashMap;
use std::hash::Hash;

/// 保序分组
///
/// 分组按键首次出现的顺序输出，组内保持原始顺序。
/// 返回的每个分组至少含一个元素。
pub fn group_in_order<'a, T, K, F>(items: &'a [T], key_fn: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();

    for item in items {
        let key = key_fn(item);
        match index.get(&key) {
            Some(&pos) => groups[pos].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    groups
}

/// 产品分组键
pub fn product_key(request: &ProductionRequest) -> String {
    canonical(&request.product_code)
}

/// 品类分组键
pub fn category_key(request: &ProductionRequest) -> String {
    canonical(&request.category)
}

/// 平台分组键（仅 ID）
pub fn marketplace_key(request: &ProductionRequest) -> String {
    canonical(&request.marketplace_id)
}

/// 规范化：去除首尾空白，大小写敏感
pub fn canonical(raw: &str) -> String {
    raw.trim().to_string()
}
