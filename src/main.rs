// ==========================================
// 住宅建造估算系统 - 命令行入口
// ==========================================
// 子命令: estimate / compress / default-config / project / advise
// 输出: 结果写 stdout (文本或 JSON), 日志写 stderr
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use construction_planner::advisor::{OllamaNarrator, PlanNarrator};
use construction_planner::config::app_config::ENV_DB_PATH;
use construction_planner::{
    logging, AppConfig, CompressionResult, CompressionSimulator, CostConfig, CostConfigOverride,
    CreateProjectRequest, EstimateReport, EstimationOrchestrator, ProjectApi, ProjectInputs,
    ProjectStatus, APP_NAME, VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "construction-planner", version, about = "住宅建造估算系统")]
struct Cli {
    /// SQLite 数据库路径 (project 子命令使用)
    #[arg(long, global = true, env = ENV_DB_PATH)]
    database: Option<String>,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 估算材料、阶段、成本、周计划与户型
    Estimate {
        /// 单层建筑面积 (sq ft)
        #[arg(long)]
        area: f64,
        /// 楼层数
        #[arg(long)]
        floors: u32,
        /// 总工期 (周)
        #[arg(long)]
        timeline: i32,
        /// 费率覆写文件 (JSON)
        #[arg(long)]
        rates: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// 模拟工期压缩
    Compress {
        #[arg(long)]
        original_timeline: i32,
        #[arg(long)]
        new_timeline: i32,
        /// 原总成本
        #[arg(long)]
        cost: f64,
        #[arg(long)]
        json: bool,
    },
    /// 输出默认费率 (JSON)
    DefaultConfig,
    /// 项目管理
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// 生成施工方案叙述 (需本地文本生成服务)
    Advise {
        #[arg(long)]
        area: f64,
        #[arg(long)]
        floors: u32,
        #[arg(long)]
        timeline: i32,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectCommand {
    /// 创建项目
    Create {
        #[arg(long)]
        user: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        area: f64,
        #[arg(long)]
        floors: u32,
        #[arg(long)]
        timeline: i32,
        #[arg(long)]
        rates: Option<PathBuf>,
    },
    /// 列出项目
    List {
        #[arg(long)]
        user: String,
    },
    /// 查看项目详情 (JSON)
    Show {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: String,
    },
    /// 调整项目费率并重新估算
    UpdateConfig {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        rates: PathBuf,
    },
    /// 变更项目状态 (DRAFT / IN_PROGRESS / COMPLETED)
    Status {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: String,
    },
    /// 基于已存储结果模拟工期压缩
    Compress {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        new_timeline: i32,
    },
    /// 删除项目
    Delete {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }
    tracing::debug!("{} v{}", APP_NAME, VERSION);

    let mut app_config = AppConfig::from_env();
    if let Some(database) = cli.database {
        app_config.db_path = database;
    }

    match cli.command {
        Command::Estimate {
            area,
            floors,
            timeline,
            rates,
            json,
        } => {
            let overrides = read_overrides(rates.as_deref())?.unwrap_or_default();
            overrides.validate()?;
            let config = CostConfig::default().merge(&overrides);

            let inputs = ProjectInputs::new(area, floors, timeline);
            let report = EstimationOrchestrator::new().estimate(&inputs, &config)?;
            if json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }
        Command::Compress {
            original_timeline,
            new_timeline,
            cost,
            json,
        } => {
            let result = CompressionSimulator::new().simulate_compression(
                original_timeline,
                new_timeline,
                cost,
            )?;
            if json {
                print_json(&result)?;
            } else {
                print_compression(&result);
            }
        }
        Command::DefaultConfig => print_json(&CostConfig::default())?,
        Command::Project { command } => {
            let api = ProjectApi::open(&app_config.db_path)?;
            run_project_command(&api, command)?;
        }
        Command::Advise {
            area,
            floors,
            timeline,
        } => {
            let inputs = ProjectInputs::new(area, floors, timeline);
            EstimationOrchestrator::validate_inputs(&inputs)?;
            let narrator = OllamaNarrator::new(&app_config)?;
            let text = narrator.narrate(&inputs).await?;
            println!("{}", text);
        }
    }

    Ok(())
}

fn run_project_command(api: &ProjectApi, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::Create {
            user,
            name,
            area,
            floors,
            timeline,
            rates,
        } => {
            let request = CreateProjectRequest {
                project_name: name,
                built_up_area: area,
                number_of_floors: floors,
                project_timeline: timeline,
            };
            let summary = api.create_project(&user, request, read_overrides(rates.as_deref())?)?;
            print_json(&summary)?;
        }
        ProjectCommand::List { user } => print_json(&api.list_projects(&user)?)?,
        ProjectCommand::Show { user, id } => print_json(&api.get_project_detail(&user, &id)?)?,
        ProjectCommand::UpdateConfig { user, id, rates } => {
            let overrides = read_overrides(Some(&rates))?.unwrap_or_default();
            print_json(&api.update_project_config(&user, &id, overrides)?)?;
        }
        ProjectCommand::Status { user, id, status } => {
            let status = ProjectStatus::parse(&status)
                .ok_or_else(|| anyhow!("未知项目状态: {}", status))?;
            api.update_project_status(&user, &id, status)?;
        }
        ProjectCommand::Compress {
            user,
            id,
            new_timeline,
        } => print_json(&api.simulate_timeline_compression(&user, &id, new_timeline)?)?,
        ProjectCommand::Delete { user, id } => api.delete_project(&user, &id)?,
    }
    Ok(())
}

fn read_overrides(path: Option<&Path>) -> Result<Option<CostConfigOverride>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("读取费率文件失败: {}", path.display()))?;
    let overrides = serde_json::from_str(&raw)
        .with_context(|| format!("解析费率文件失败: {}", path.display()))?;
    Ok(Some(overrides))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report(report: &EstimateReport) {
    println!(
        "总面积: {} sq ft ({} 层), 工期: {} 周",
        report.total_area, report.inputs.number_of_floors, report.inputs.project_timeline
    );

    println!("\n材料:");
    for m in &report.materials {
        println!(
            "  {:<10} {:>10} {:<6} ₹{:>14.2}  [{}]",
            m.material_name, m.quantity, m.unit, m.cost, m.phase
        );
    }

    println!("\n阶段:");
    for p in &report.phases {
        println!(
            "  {:<10} 第 {:>3} 周起, {:>3} 周, 人工 ₹{:.2}",
            p.name.as_str(),
            p.start_week,
            p.duration_weeks,
            p.labor_cost()
        );
        for l in &p.labor_allocations {
            println!(
                "    {:<12} x{:<3} {:>4} 天 ₹{:.2}",
                l.worker_type.as_str(), l.quantity, l.days_required, l.cost
            );
        }
    }

    println!("\n成本:");
    println!("  材料 ₹{:.2}", report.cost.material_cost);
    println!("  人工 ₹{:.2}", report.cost.labor_cost);
    println!("  合计 ₹{:.2}", report.cost.total_cost);

    println!("\n户型:");
    for layout in &report.layouts {
        println!(
            "  {} 层: {} 间 - {}",
            layout.floor_number, layout.total_rooms, layout.suggestions
        );
    }

    println!("\n周计划: {} 周", report.schedule.len());
    for warning in &report.warnings {
        println!("警告: {}", warning);
    }
}

fn print_compression(result: &CompressionResult) {
    println!("新成本: ₹{:.2}", result.new_cost);
    println!(
        "成本增加: ₹{:.2} ({:.2}%)",
        result.cost_increase, result.percentage_increase
    );
    println!("人力增加: {:.2}%", result.workforce_increase);
    for risk in &result.risks {
        println!("  - {}", risk);
    }
}
