//! 入场动画模块
//!
//! 窗口显示时播放一次的淡入动画

use std::time::{Duration, Instant};

use log::{debug, info};

/// 动画刷新间隔（约60帧）
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// 淡入动画
#[derive(Debug, Clone)]
pub struct FadeIn {
    /// 动画时长
    duration: Duration,
    /// 开始时间，只会设置一次
    started_at: Option<Instant>,
}

impl FadeIn {
    /// 创建新的淡入动画
    ///
    /// # 参数
    ///
    /// * `duration` - 从完全透明到完全不透明所需的时间
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
        }
    }

    /// 开始播放动画
    ///
    /// 只有第一次调用会生效，返回是否真正开始
    pub fn start(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() {
            debug!("淡入动画已播放过，忽略重复的开始请求");
            return false;
        }

        info!("开始播放淡入动画，时长: {:?}", self.duration);
        self.started_at = Some(now);
        true
    }

    /// 是否已经开始
    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// 动画是否仍在进行
    pub fn is_running(&self, now: Instant) -> bool {
        match self.started_at {
            Some(start) => now.saturating_duration_since(start) < self.duration,
            None => false,
        }
    }

    /// 计算当前不透明度
    ///
    /// 未开始时为0，结束后为1，中间使用二次缓出曲线
    pub fn opacity(&self, now: Instant) -> f32 {
        let Some(start) = self.started_at else {
            return 0.0;
        };

        if self.duration.is_zero() {
            return 1.0;
        }

        let elapsed = now.saturating_duration_since(start);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);

        1.0 - (1.0 - t) * (1.0 - t)
    }
}

impl Default for FadeIn {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}
