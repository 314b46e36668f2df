// ==========================================
// 住宅建造估算系统 - 项目管理 API
// ==========================================
// 职责: 项目的创建、查询、费率调整、状态变更、工期压缩模拟、删除
// 流程: 校验 → 引擎估算 → 仓储持久化
// 约束: 所有项目操作按 (user_id, project_id) 限定归属
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::InputValidator;
use crate::config::{CostConfig, CostConfigOverride};
use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::cost::{CompressionResult, CostBreakdown};
use crate::domain::layout::LayoutSuggestion;
use crate::domain::material::MaterialRequirement;
use crate::domain::phase::Phase;
use crate::domain::project::{Project, ProjectInputs};
use crate::domain::schedule::WeeklyScheduleEntry;
use crate::domain::types::ProjectStatus;
use crate::engine::{CompressionSimulator, CostAggregator, EstimateReport, EstimationOrchestrator};
use crate::repository::{EstimateRows, ProjectRepository};

// ==========================================
// 请求/响应 DTO
// ==========================================

/// 创建项目请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub project_name: String,
    pub built_up_area: f64,
    pub number_of_floors: u32,
    pub project_timeline: i32, // 周
}

impl CreateProjectRequest {
    pub fn inputs(&self) -> ProjectInputs {
        ProjectInputs::new(
            self.built_up_area,
            self.number_of_floors,
            self.project_timeline,
        )
    }
}

/// 项目摘要 (列表/创建返回)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub project_name: String,
    pub built_up_area: f64,
    pub number_of_floors: u32,
    pub project_timeline: i32,
    pub total_cost: f64,
    pub status: ProjectStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Project> for ProjectSummary {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            project_name: project.project_name,
            built_up_area: project.built_up_area,
            number_of_floors: project.number_of_floors,
            project_timeline: project.project_timeline,
            total_cost: project.total_cost,
            status: project.status,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// 项目详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub config: CostConfig,
    pub cost: CostBreakdown,
    pub phases: Vec<Phase>,
    pub materials: Vec<MaterialRequirement>,
    pub schedules: Vec<WeeklyScheduleEntry>,
    pub layouts: Vec<LayoutSuggestion>,
}

fn rows_of(report: &EstimateReport) -> EstimateRows<'_> {
    EstimateRows {
        phases: &report.phases,
        materials: &report.materials,
        schedule: &report.schedule,
        layouts: &report.layouts,
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// ==========================================
// ProjectApi - 项目管理 API
// ==========================================

/// 项目管理API
///
/// 职责：
/// 1. 创建项目并持久化完整估算结果
/// 2. 按用户查询项目列表与详情
/// 3. 费率调整后重新估算
/// 4. 基于已存储结果模拟工期压缩
pub struct ProjectApi {
    project_repo: Arc<ProjectRepository>,
    orchestrator: EstimationOrchestrator,
    aggregator: CostAggregator,
    compression: CompressionSimulator,
}

impl ProjectApi {
    /// 创建新的ProjectApi实例
    pub fn new(project_repo: Arc<ProjectRepository>) -> Self {
        Self {
            project_repo,
            orchestrator: EstimationOrchestrator::new(),
            aggregator: CostAggregator::new(),
            compression: CompressionSimulator::new(),
        }
    }

    /// 打开数据库 (建库幂等) 并创建仓储
    pub fn open(db_path: &str) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseError(format!("打开数据库失败: {}", e)))?;
        init_schema(&conn).map_err(|e| ApiError::DatabaseError(format!("建库失败: {}", e)))?;

        Ok(Self::new(Arc::new(ProjectRepository::from_connection(
            Arc::new(Mutex::new(conn)),
        ))))
    }

    /// 默认费率配置
    pub fn default_config(&self) -> CostConfig {
        CostConfig::default()
    }

    /// 创建项目
    ///
    /// # 参数
    /// - user_id: 归属用户
    /// - request: 名称 + 面积/楼层/工期
    /// - overrides: 费率覆写 (None 时使用默认费率)
    ///
    /// # 返回
    /// - Ok(ProjectSummary): 新项目摘要 (状态 DRAFT)
    /// - Err(ApiError): 校验/估算/持久化失败
    pub fn create_project(
        &self,
        user_id: &str,
        request: CreateProjectRequest,
        overrides: Option<CostConfigOverride>,
    ) -> ApiResult<ProjectSummary> {
        InputValidator::validate_user_id(user_id)?;
        InputValidator::validate_project_name(&request.project_name)?;
        let inputs = request.inputs();
        InputValidator::validate_inputs(&inputs)?;

        let overrides = overrides.unwrap_or_default();
        InputValidator::validate_override(&overrides)?;
        let config = CostConfig::default().merge(&overrides);

        let report = self.orchestrator.estimate(&inputs, &config)?;
        for warning in &report.warnings {
            warn!(user_id = %user_id, "{}", warning);
        }

        let created_at = now();
        let project = Project {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            project_name: request.project_name.trim().to_string(),
            built_up_area: inputs.built_up_area,
            number_of_floors: inputs.number_of_floors,
            project_timeline: inputs.project_timeline,
            total_cost: report.cost.total_cost,
            status: ProjectStatus::Draft,
            created_at,
            updated_at: created_at,
        };

        self.project_repo
            .create(&project, &config, rows_of(&report))?;

        info!(
            project_id = %project.id,
            user_id = %user_id,
            total_cost = project.total_cost,
            "项目创建成功"
        );

        Ok(ProjectSummary::from(project))
    }

    /// 查询用户的项目列表 (新建在前)
    pub fn list_projects(&self, user_id: &str) -> ApiResult<Vec<ProjectSummary>> {
        InputValidator::validate_user_id(user_id)?;

        let projects = self.project_repo.list_by_user(user_id)?;
        Ok(projects.into_iter().map(ProjectSummary::from).collect())
    }

    /// 查询项目详情
    ///
    /// 项目、费率与派生数据取自同一快照
    ///
    /// # 返回
    /// - Err(NotFound): 项目不存在或不属于该用户
    pub fn get_project_detail(&self, user_id: &str, project_id: &str) -> ApiResult<ProjectDetail> {
        InputValidator::validate_user_id(user_id)?;
        InputValidator::validate_project_id(project_id)?;

        let snapshot = self.project_repo.get_snapshot(project_id, user_id)?;
        let config = CostConfig::from_rate_table(&snapshot.rates)?;
        let cost = self
            .aggregator
            .compute_cost_breakdown(&snapshot.materials, &snapshot.phases);

        Ok(ProjectDetail {
            project: snapshot.project,
            config,
            cost,
            phases: snapshot.phases,
            materials: snapshot.materials,
            schedules: snapshot.schedules,
            layouts: snapshot.layouts,
        })
    }

    /// 调整项目费率并重新估算
    ///
    /// 覆写叠加在项目已存储的费率表之上, 派生数据与总成本整体替换
    ///
    /// # 返回
    /// - Ok(CostConfig): 生效后的完整费率
    pub fn update_project_config(
        &self,
        user_id: &str,
        project_id: &str,
        overrides: CostConfigOverride,
    ) -> ApiResult<CostConfig> {
        InputValidator::validate_user_id(user_id)?;
        InputValidator::validate_project_id(project_id)?;
        InputValidator::validate_override(&overrides)?;

        let project = self.project_repo.get(project_id, user_id)?;
        let config = self.load_config(project_id, user_id)?.merge(&overrides);

        let report = self.orchestrator.estimate(&project.inputs(), &config)?;
        self.project_repo.update_config(
            project_id,
            user_id,
            &config,
            report.cost.total_cost,
            rows_of(&report),
            now(),
        )?;

        info!(
            project_id = %project_id,
            user_id = %user_id,
            total_cost = report.cost.total_cost,
            "项目费率已更新并重新估算"
        );

        Ok(config)
    }

    /// 变更项目状态
    pub fn update_project_status(
        &self,
        user_id: &str,
        project_id: &str,
        status: ProjectStatus,
    ) -> ApiResult<()> {
        InputValidator::validate_user_id(user_id)?;
        InputValidator::validate_project_id(project_id)?;

        self.project_repo
            .update_status(project_id, user_id, status, now())?;

        info!(
            project_id = %project_id,
            user_id = %user_id,
            status = %status,
            "项目状态已变更"
        );
        Ok(())
    }

    /// 模拟工期压缩
    ///
    /// 基准成本 = 已存储材料成本 + 已存储人工成本, 基准工期 = 项目工期
    pub fn simulate_timeline_compression(
        &self,
        user_id: &str,
        project_id: &str,
        new_timeline: i32,
    ) -> ApiResult<CompressionResult> {
        InputValidator::validate_user_id(user_id)?;
        InputValidator::validate_project_id(project_id)?;
        InputValidator::validate_timeline(new_timeline)?;

        let snapshot = self.project_repo.get_snapshot(project_id, user_id)?;
        let project = snapshot.project;
        let baseline = self
            .aggregator
            .compute_cost_breakdown(&snapshot.materials, &snapshot.phases);

        let result = self.compression.simulate_compression(
            project.project_timeline,
            new_timeline,
            baseline.total_cost,
        )?;

        info!(
            project_id = %project_id,
            original_timeline = project.project_timeline,
            new_timeline = new_timeline,
            cost_increase = result.cost_increase,
            "工期压缩模拟完成"
        );

        Ok(result)
    }

    /// 删除项目 (派生数据级联删除)
    pub fn delete_project(&self, user_id: &str, project_id: &str) -> ApiResult<()> {
        InputValidator::validate_user_id(user_id)?;
        InputValidator::validate_project_id(project_id)?;

        self.project_repo.delete(project_id, user_id)?;

        info!(project_id = %project_id, user_id = %user_id, "项目已删除");
        Ok(())
    }

    fn load_config(&self, project_id: &str, user_id: &str) -> ApiResult<CostConfig> {
        let rates = self.project_repo.load_rates(project_id, user_id)?;
        Ok(CostConfig::from_rate_table(&rates)?)
    }
}
