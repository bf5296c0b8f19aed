//! 種類ごとの進行中リクエスト
//!
//! 新しいリクエストを始めると同じ種類の前のリクエストは中断される。
//! 中断された応答は `ApiFailure::Aborted` になり、チケットも古いので適用されない。

use mushroom_scout_common::ApiFailure;
use web_sys::AbortController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Detect,
    History,
    Overview,
    Classes,
}

#[derive(Default)]
pub struct AbortLane {
    current: Option<AbortController>,
}

impl AbortLane {
    /// 前のリクエストを中断して新しいコントローラを用意
    pub fn begin(&mut self) -> Result<AbortController, ApiFailure> {
        self.abort();
        let controller = AbortController::new()
            .map_err(|e| ApiFailure::Transport(format!("AbortController: {:?}", e)))?;
        self.current = Some(controller.clone());
        Ok(controller)
    }

    pub fn abort(&mut self) {
        if let Some(controller) = self.current.take() {
            controller.abort();
        }
    }
}

#[derive(Default)]
pub struct Lanes {
    detect: AbortLane,
    history: AbortLane,
    overview: AbortLane,
    classes: AbortLane,
}

impl Lanes {
    pub fn lane_mut(&mut self, lane: Lane) -> &mut AbortLane {
        match lane {
            Lane::Detect => &mut self.detect,
            Lane::History => &mut self.history,
            Lane::Overview => &mut self.overview,
            Lane::Classes => &mut self.classes,
        }
    }

    /// すべて中断（アンマウント時）
    pub fn abort_all(&mut self) {
        for lane in [Lane::Detect, Lane::History, Lane::Overview, Lane::Classes] {
            self.lane_mut(lane).abort();
        }
    }
}
