//! Command-line surface of the BCI probe.
//!
//! Each subcommand runs one dashboard operation through [`BciClient`] and
//! produces a [`Report`]. Reads always produce a report, flagged when the
//! data is the mock fallback; writes fail the command when the backend
//! rejects them.

use anyhow::{Context, Result};
use bci_client::mutations::{
    CypherVariables, DeleteNodeVariables, UpdateNodeVariables, UpdateTaskVariables,
};
use bci_client::{
    BciClient, ClientConfig, DataSource, DatabaseNodesVariables, InputVariables, MutationOptions,
    QueryResult, RetryPolicy, SearchMemoriesVariables, SystemLogsVariables, TasksVariables,
};
use bci_types::{
    CreateNodeInput, CreateRelationshipInput, CreateTaskInput, MemoryInput, StartPomodoroInput,
    UpdateTaskInput,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "bci-probe")]
#[command(about = "Run BCI dashboard GraphQL operations from the command line")]
pub struct Args {
    /// GraphQL endpoint (defaults to BCI_GRAPHQL_ENDPOINT, then production)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds, 0 to disable
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Make a single attempt per request
    #[arg(long)]
    pub no_retry: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Labels and relationship types of the graph
    Schema,
    /// Raw nodes of one label
    Nodes {
        label: String,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        offset: Option<i64>,
        /// Decode each node's JSON-encoded properties
        #[arg(long)]
        parsed: bool,
    },
    /// Backend and data service health
    Health,
    /// Memory store counters
    MemoryStats,
    /// Semantic search over memories
    Memories {
        query: String,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long = "type")]
        memory_type: Option<String>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        relations: bool,
    },
    /// Tracked tasks
    Tasks {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        assigned_to: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Task counters
    TaskStats,
    /// Recent backend log lines
    Logs {
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        service: Option<String>,
    },
    /// Request metrics
    Metrics,
    /// Replace a node's properties
    UpdateNode {
        node_id: String,
        /// JSON object
        properties: String,
    },
    CreateNode {
        label: String,
        /// JSON object
        properties: String,
    },
    DeleteNode { node_id: String },
    /// Run an ad-hoc Cypher statement
    Cypher {
        cypher: String,
        /// JSON object of statement parameters
        #[arg(long)]
        parameters: Option<String>,
    },
    StoreMemory {
        text: String,
        #[arg(long = "type", default_value = "context")]
        memory_type: String,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long)]
        project: Option<String>,
    },
    CreateTask {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    UpdateTask {
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Start a focus-timer session on a task
    StartPomodoro {
        task_id: String,
        #[arg(long, default_value = "25")]
        minutes: i64,
    },
    CreateRelationship {
        source_id: String,
        target_id: String,
        relationship_type: String,
        /// JSON object
        #[arg(long)]
        properties: Option<String>,
    },
}

/// Outcome of one command.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub operation: &'static str,
    /// Origin of read data. Absent for writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
    /// True when a read was answered with mock data.
    pub demo_mode: bool,
    /// Error reported alongside data, e.g. GraphQL errors in a partial result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data: Value,
}

/// Client configuration: environment first, then command-line overrides.
pub fn client_config(args: &Args) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("reading BCI_GRAPHQL_* environment")?;
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout = (ms > 0).then(|| Duration::from_millis(ms));
    }
    if args.no_retry {
        config.retry = RetryPolicy::disabled();
    }
    Ok(config)
}

/// Runs one command against the client.
pub async fn execute(client: &BciClient, command: &Command) -> Result<Report> {
    match command {
        Command::Schema => read(client, "GetDatabaseSchema", client.database_schema().await),
        Command::Nodes {
            label,
            limit,
            offset,
            parsed,
        } => {
            let vars = DatabaseNodesVariables {
                label: label.clone(),
                limit: *limit,
                offset: *offset,
            };
            if *parsed {
                read(client, "GetDatabaseNodes", client.parsed_database_nodes(&vars).await)
            } else {
                read(client, "GetDatabaseNodes", client.database_nodes(&vars).await)
            }
        }
        Command::Health => read(client, "GetHealthCheck", client.health_check().await),
        Command::MemoryStats => read(client, "GetMemoryStats", client.memory_stats().await),
        Command::Memories {
            query,
            limit,
            memory_type,
            project,
            relations,
        } => {
            let vars = SearchMemoriesVariables {
                query: query.clone(),
                limit: *limit,
                memory_type: memory_type.clone(),
                project: project.clone(),
                include_relations: relations.then_some(true),
            };
            read(client, "SearchMemories", client.search_memories(&vars).await)
        }
        Command::Tasks {
            status,
            priority,
            assigned_to,
            limit,
        } => {
            let vars = TasksVariables {
                status: status.clone(),
                priority: priority.clone(),
                assigned_to: assigned_to.clone(),
                limit: *limit,
            };
            read(client, "GetTasks", client.tasks(&vars).await)
        }
        Command::TaskStats => read(client, "GetTaskStats", client.task_stats().await),
        Command::Logs {
            limit,
            level,
            service,
        } => {
            let vars = SystemLogsVariables {
                limit: *limit,
                level: level.clone(),
                service: service.clone(),
            };
            read(client, "GetSystemLogs", client.system_logs(&vars).await)
        }
        Command::Metrics => read(client, "GetMetrics", client.metrics().await),
        Command::UpdateNode {
            node_id,
            properties,
        } => {
            let properties = json_arg("properties", properties)?;
            let vars = UpdateNodeVariables::new(node_id.clone(), &properties);
            let payload = client
                .update_node(MutationOptions::new())
                .mutate(&vars)
                .await
                .context("updateNode failed")?;
            write("UpdateNode", &payload)
        }
        Command::CreateNode { label, properties } => {
            let input = CreateNodeInput::new(label.clone(), &json_arg("properties", properties)?);
            let payload = client
                .create_node(MutationOptions::new())
                .mutate(&InputVariables::new(input))
                .await
                .context("createNode failed")?;
            write("CreateNode", &payload)
        }
        Command::DeleteNode { node_id } => {
            let vars = DeleteNodeVariables {
                node_id: node_id.clone(),
            };
            let payload = client
                .delete_node(MutationOptions::new())
                .mutate(&vars)
                .await
                .context("deleteNode failed")?;
            write("DeleteNode", &payload)
        }
        Command::Cypher { cypher, parameters } => {
            let mut vars = CypherVariables::new(cypher.clone());
            if let Some(parameters) = parameters {
                vars = vars.with_parameters(&json_arg("parameters", parameters)?);
            }
            let payload = client
                .execute_cypher(MutationOptions::new())
                .mutate(&vars)
                .await
                .context("databaseQuery failed")?;
            write("ExecuteCypher", &payload)
        }
        Command::StoreMemory {
            text,
            memory_type,
            tags,
            project,
        } => {
            let input = MemoryInput {
                text: text.clone(),
                memory_type: memory_type.clone(),
                tags: tags.clone(),
                project: project.clone(),
            };
            let payload = client
                .store_memory(MutationOptions::new())
                .mutate(&InputVariables::new(input))
                .await
                .context("storeMemory failed")?;
            write("StoreMemory", &payload)
        }
        Command::CreateTask {
            title,
            description,
            priority,
            tags,
        } => {
            let mut input = CreateTaskInput::titled(title.clone());
            input.description = description.clone();
            input.priority = priority.clone();
            input.tags = tags.clone();
            let payload = client
                .create_task(MutationOptions::new())
                .mutate(&InputVariables::new(input))
                .await
                .context("createTask failed")?;
            write("CreateTask", &payload)
        }
        Command::UpdateTask {
            task_id,
            title,
            status,
            priority,
        } => {
            let input = UpdateTaskInput {
                title: title.clone(),
                status: status.clone(),
                priority: priority.clone(),
                ..UpdateTaskInput::default()
            };
            let payload = client
                .update_task(MutationOptions::new())
                .mutate(&UpdateTaskVariables::new(task_id.clone(), input))
                .await
                .context("updateTask failed")?;
            write("UpdateTask", &payload)
        }
        Command::StartPomodoro { task_id, minutes } => {
            let input = StartPomodoroInput {
                task_id: task_id.clone(),
                duration_minutes: *minutes,
            };
            let payload = client
                .start_pomodoro(MutationOptions::new())
                .mutate(&InputVariables::new(input))
                .await
                .context("startPomodoro failed")?;
            write("StartPomodoro", &payload)
        }
        Command::CreateRelationship {
            source_id,
            target_id,
            relationship_type,
            properties,
        } => {
            let properties = match properties {
                Some(raw) => Some(json_arg("properties", raw)?.to_string()),
                None => None,
            };
            let input = CreateRelationshipInput {
                source_id: source_id.clone(),
                target_id: target_id.clone(),
                relationship_type: relationship_type.clone(),
                properties,
            };
            let payload = client
                .create_relationship(MutationOptions::new())
                .mutate(&InputVariables::new(input))
                .await
                .context("createRelationship failed")?;
            write("CreateRelationship", &payload)
        }
    }
}

fn read<T: Serialize>(
    client: &BciClient,
    operation: &'static str,
    result: QueryResult<T>,
) -> Result<Report> {
    let data = match &result.data {
        Some(data) => serde_json::to_value(data).context("encoding result")?,
        None => Value::Null,
    };
    Ok(Report {
        operation,
        source: Some(result.source),
        demo_mode: result.is_mock() || client.is_demo_mode(),
        error: result.error.map(|e| e.to_string()),
        data,
    })
}

fn write<T: Serialize>(operation: &'static str, payload: &T) -> Result<Report> {
    Ok(Report {
        operation,
        source: None,
        demo_mode: false,
        error: None,
        data: serde_json::to_value(payload).context("encoding payload")?,
    })
}

fn json_arg(name: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("{name} must be valid JSON"))
}
