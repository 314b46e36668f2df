// ==========================================
// 住宅建造估算系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 估算支持工具 (确定性计算, 结果仅供规划参考)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 费率与运行时配置
pub mod config;

// 引擎层 - 纯计算
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 数据库基础设施（连接初始化/PRAGMA 统一/建库）
pub mod db;

// API 层 - 业务接口
pub mod api;

// 文本生成协作方 - 叙述性建议
pub mod advisor;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FloorPosition, MaterialKind, PhaseName, ProjectStatus, WorkerType};

// 领域实体
pub use domain::{
    CompressionResult, CostBreakdown, LaborAllocation, LayoutConfig, LayoutSuggestion,
    MaterialRequirement, Phase, Project, ProjectInputs, WeeklyScheduleEntry,
};

// 配置
pub use config::{AppConfig, CostConfig, CostConfigOverride};

// 引擎
pub use engine::{
    CompressionSimulator, CostAggregator, EngineError, EstimateReport, EstimationOrchestrator,
    LayoutGenerator, MaterialEstimator, PhasePlanner, ScheduleGenerator,
};

// API
pub use api::{ApiError, CreateProjectRequest, ProjectApi, ProjectDetail, ProjectSummary};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "住宅建造估算系统";
