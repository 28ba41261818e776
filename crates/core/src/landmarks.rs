//! 有序地标序列
//!
//! 地标只由其在序列中的位置标识，显示编号 = 索引 + 1。

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// 列表中的一行（返回给前端）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkEntry {
    /// 显示编号，从 1 开始
    pub number: usize,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandmarkStore {
    points: Vec<Point>,
}

impl LandmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, point: Point) {
        self.points.push(point);
        log::debug!("[Landmarks] 添加 #{} ({}, {})", self.points.len(), point.x, point.y);
    }

    /// 删除指定位置的地标，越界时不做任何修改
    pub fn remove_at(&mut self, index: usize) -> Option<Point> {
        if index >= self.points.len() {
            log::debug!("[Landmarks] 忽略越界删除: {} (共 {})", index, self.points.len());
            return None;
        }
        let removed = self.points.remove(index);
        log::debug!("[Landmarks] 删除 #{}", index + 1);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn entries(&self) -> Vec<LandmarkEntry> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| LandmarkEntry {
                number: i + 1,
                x: p.x,
                y: p.y,
            })
            .collect()
    }
}
