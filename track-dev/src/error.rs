use derive_more::Display;

/// 控制器协议中可能耗尽重试的阶段
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    #[display(fmt = "ready")]
    Ready,
    #[display(fmt = "calibrate")]
    Calibrate,
    #[display(fmt = "seek")]
    Seek,
    #[display(fmt = "transfer")]
    Transfer,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// 重试预算耗尽
    #[display(fmt = "{}: {} retries exhausted", stage, attempts)]
    Timeout { stage: Stage, attempts: u32 },
    /// 设备无法寻址该磁道
    #[display(fmt = "track {} out of range", track)]
    OutOfRange { track: usize },
    /// 底层介质读写失败
    #[display(fmt = "medium error on track {}", track)]
    Medium { track: usize },
}
