use anyhow::Result;
use chrono::Local;
use ratatui::widgets::TableState;
use rms_planner_core::{parse_pool, parse_scenario, ImpactReport, PlannerService, ResourcePool, ScenarioRepository};

pub enum InputMode {
    Normal,
    Adding,
    EditingPool,
}

pub struct App<R: ScenarioRepository> {
    pub service: PlannerService<R>,
    pub pool: ResourcePool,
    pub report: ImpactReport,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub message: Option<String>,
}

impl<R: ScenarioRepository> App<R> {
    pub fn new(service: PlannerService<R>, pool: ResourcePool) -> Result<Self> {
        let report = service.evaluate(&pool)?;
        let mut state = TableState::default();
        if !report.scenarios.is_empty() {
            state.select(Some(0));
        }
        Ok(Self {
            service,
            pool,
            report,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            message: None,
        })
    }

    pub fn next(&mut self) {
        let len = self.report.scenarios.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.report.scenarios.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn delete_selected(&mut self) {
        let Some(i) = self.state.selected() else { return };
        let Some(row) = self.report.scenarios.get(i) else { return };

        let id = row.id.to_string();
        match self.service.remove_scenario(&id) {
            Ok(removed) => self.message = Some(format!("Removed {}", removed.short_id())),
            Err(e) => self.message = Some(e.to_string()),
        }
        self.recompute();

        let len = self.report.scenarios.len();
        if len == 0 {
            self.state.select(None);
        } else if i >= len {
            self.state.select(Some(len - 1));
        }
    }

    /// Re-evaluates the working set against the current pool.
    fn recompute(&mut self) {
        match self.service.evaluate(&self.pool) {
            Ok(report) => self.report = report,
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_pool_mode(&mut self) {
        self.input_mode = InputMode::EditingPool;
        self.input = format!("{} {}", self.pool.total_capacity, self.pool.available_capacity);
        self.cursor_position = self.input.chars().count();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        let args: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        match self.input_mode {
            InputMode::Adding => self.submit_add(&args),
            InputMode::EditingPool => self.submit_pool(&args),
            InputMode::Normal => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_add(&mut self, args: &[String]) {
        let today = Local::now().date_naive();
        let added = parse_scenario(args, today, false)
            .map_err(anyhow::Error::from)
            .and_then(|s| self.service.add_scenario(s));

        match added {
            Ok(scenario) => {
                self.message = Some(format!("Added {}", scenario.short_id()));
                self.recompute();
                if let Some(pos) = self.report.scenarios.iter().position(|r| r.id == scenario.id) {
                    self.state.select(Some(pos));
                }
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn submit_pool(&mut self, args: &[String]) {
        match parse_pool(args) {
            Ok(mut pool) => {
                if pool.item.is_none() {
                    pool.item = self.pool.item.take();
                }
                self.pool = pool;
                self.message = Some("Pool updated".to_string());
                self.recompute();
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }
}
