//! Binding capability catalog
//!
//! Maps annotation names to what they bind. Built-in entries cover the
//! standard extensions; annotation types declared by the program are added
//! when their immediate ancestor is one of the direction markers.

use bindmeta_ast::{simple_annotation_name, Annotation, AnnotationTypeDecl, Direction, Program, TypedValue};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Marker ancestors and the binding kind they confer
const DIRECTION_MARKERS: &[(&str, BindingKind)] = &[
    ("TriggerBinding", BindingKind::Trigger),
    ("InputBinding", BindingKind::Input),
    ("OutputBinding", BindingKind::Output),
];

/// Marker of in-process binding attributes, which the isolated model cannot load
const LEGACY_BINDING_MARKER: &str = "Microsoft.Azure.WebJobs.Description.Binding";

const HTTP_TRIGGER: &str = "HttpTrigger";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Trigger,
    Input,
    Output,
}

impl BindingKind {
    pub fn direction(&self) -> Direction {
        match self {
            BindingKind::Trigger | BindingKind::Input => Direction::In,
            BindingKind::Output => Direction::Out,
        }
    }
}

/// What one annotation binds
#[derive(Debug, Clone, PartialEq)]
pub struct BindingSpec {
    /// Simple annotation name, e.g. `QueueOutput`
    pub annotation: String,
    /// Value of the descriptor's `type` field, e.g. `Queue`
    pub binding_type: String,
    pub kind: BindingKind,
    /// Constructor overloads as ordered parameter names
    pub constructors: Vec<Vec<String>>,
    /// Constructor parameters typed as an enum; used to tell same-arity overloads apart
    pub enum_params: Vec<String>,
}

impl BindingSpec {
    pub fn new(annotation: &str, binding_type: &str, kind: BindingKind) -> Self {
        Self {
            annotation: annotation.to_string(),
            binding_type: binding_type.to_string(),
            kind,
            constructors: Vec::new(),
            enum_params: Vec::new(),
        }
    }

    pub fn constructor(mut self, params: &[&str]) -> Self {
        self.constructors
            .push(params.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn enum_param(mut self, param: &str) -> Self {
        self.enum_params.push(param.to_string());
        self
    }

    pub fn direction(&self) -> Direction {
        self.kind.direction()
    }

    pub fn is_http_trigger(&self) -> bool {
        self.kind == BindingKind::Trigger && self.annotation == HTTP_TRIGGER
    }

    /// Pick the constructor a call with `arg_count` positional arguments binds to
    ///
    /// An exact arity wins; otherwise the shortest overload that can take
    /// the arguments (trailing optional parameters). A spec without declared
    /// constructors only accepts the implicit parameterless one.
    pub fn constructor_for(&self, arg_count: usize) -> Option<&[String]> {
        if self.constructors.is_empty() {
            return (arg_count == 0).then_some(&[][..]);
        }
        self.constructors
            .iter()
            .find(|c| c.len() == arg_count)
            .or_else(|| {
                self.constructors
                    .iter()
                    .filter(|c| c.len() > arg_count)
                    .min_by_key(|c| c.len())
            })
            .map(|c| c.as_slice())
    }

    /// Like [`constructor_for`](Self::constructor_for), but among overloads
    /// of the same arity prefers the one whose enum parameters line up with
    /// the enum arguments
    pub fn constructor_for_args(&self, args: &[TypedValue]) -> Option<&[String]> {
        let fits = |params: &[String]| {
            params.iter().zip(args).all(|(param, arg)| {
                self.enum_params.contains(param) == matches!(arg, TypedValue::Enum(_))
            })
        };
        self.constructors
            .iter()
            .find(|c| c.len() == args.len() && fits(c))
            .map(|c| c.as_slice())
            .or_else(|| self.constructor_for(args.len()))
    }
}

/// Lookup table from annotation name to binding capability
#[derive(Debug, Clone, Default)]
pub struct BindingCatalog {
    specs: HashMap<String, BindingSpec>,
    legacy: HashSet<String>,
}

impl BindingCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog of the standard trigger, input and output bindings
    pub fn builtin() -> Self {
        use BindingKind::*;

        let mut catalog = Self::empty();
        let specs = [
            BindingSpec::new("HttpTrigger", "HttpTrigger", Trigger)
                .constructor(&[])
                .constructor(&["methods"])
                .constructor(&["authLevel"])
                .constructor(&["authLevel", "methods"])
                .enum_param("authLevel"),
            BindingSpec::new("QueueTrigger", "QueueTrigger", Trigger).constructor(&["queueName"]),
            BindingSpec::new("QueueOutput", "Queue", Output).constructor(&["queueName"]),
            BindingSpec::new("BlobTrigger", "BlobTrigger", Trigger).constructor(&["path"]),
            BindingSpec::new("BlobInput", "Blob", Input).constructor(&["blobPath"]),
            BindingSpec::new("BlobOutput", "Blob", Output).constructor(&["blobPath"]),
            BindingSpec::new("TimerTrigger", "TimerTrigger", Trigger).constructor(&["schedule"]),
            BindingSpec::new("ServiceBusTrigger", "ServiceBusTrigger", Trigger)
                .constructor(&["queueName"])
                .constructor(&["topicName", "subscriptionName"]),
            BindingSpec::new("ServiceBusOutput", "ServiceBus", Output)
                .constructor(&["queueOrTopicName"])
                .constructor(&["queueOrTopicName", "entityType"])
                .enum_param("entityType"),
            BindingSpec::new("EventHubTrigger", "EventHubTrigger", Trigger).constructor(&["eventHubName"]),
            BindingSpec::new("EventHubOutput", "EventHub", Output).constructor(&["eventHubName"]),
            BindingSpec::new("CosmosDBTrigger", "CosmosDBTrigger", Trigger)
                .constructor(&["databaseName", "containerName"]),
            BindingSpec::new("CosmosDBInput", "CosmosDB", Input)
                .constructor(&[])
                .constructor(&["databaseName", "containerName"]),
            BindingSpec::new("CosmosDBOutput", "CosmosDB", Output)
                .constructor(&["databaseName", "containerName"]),
            BindingSpec::new("TableInput", "Table", Input)
                .constructor(&["tableName"])
                .constructor(&["tableName", "partitionKey"])
                .constructor(&["tableName", "partitionKey", "rowKey"]),
            BindingSpec::new("TableOutput", "Table", Output)
                .constructor(&["tableName"])
                .constructor(&["tableName", "partitionKey"])
                .constructor(&["tableName", "partitionKey", "rowKey"]),
            BindingSpec::new("EventGridTrigger", "EventGridTrigger", Trigger).constructor(&[]),
            BindingSpec::new("EventGridOutput", "EventGrid", Output).constructor(&[]),
        ];

        for spec in specs {
            catalog.register(spec);
        }
        catalog
    }

    /// Built-in catalog extended with the program's declared annotation types
    pub fn for_program(program: &Program) -> Self {
        let mut catalog = Self::builtin();
        for decl in &program.annotation_types {
            catalog.declare(decl);
        }
        catalog
    }

    pub fn register(&mut self, spec: BindingSpec) {
        self.specs.insert(spec.annotation.clone(), spec);
    }

    /// Add a declared annotation type if its ancestry makes it a binding
    pub fn declare(&mut self, decl: &AnnotationTypeDecl) {
        let simple = decl.simple_name().to_string();

        if decl
            .markers
            .iter()
            .any(|m| simple_annotation_name(m) == simple_annotation_name(LEGACY_BINDING_MARKER))
        {
            self.legacy.insert(simple.clone());
        }

        let Some(kind) = decl.base.as_deref().and_then(marker_kind) else {
            return;
        };

        let spec = BindingSpec {
            binding_type: binding_type_for(&simple),
            annotation: simple,
            kind,
            constructors: decl.constructors.clone(),
            enum_params: Vec::new(),
        };
        debug!(annotation = %spec.annotation, binding_type = %spec.binding_type, "declared binding");
        self.register(spec);
    }

    pub fn lookup(&self, annotation: &Annotation) -> Option<&BindingSpec> {
        self.specs.get(annotation.simple_name())
    }

    /// True for annotations from the in-process binding model
    pub fn is_legacy(&self, annotation: &Annotation) -> bool {
        self.legacy.contains(annotation.simple_name())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn marker_kind(base: &str) -> Option<BindingKind> {
    let base = simple_annotation_name(base);
    DIRECTION_MARKERS
        .iter()
        .find(|(marker, _)| *marker == base)
        .map(|(_, kind)| *kind)
}

/// `QueueOutput` -> `Queue`, `CosmosDBInput` -> `CosmosDB`
fn binding_type_for(simple_name: &str) -> String {
    for suffix in ["Input", "Output"] {
        if let Some(stripped) = simple_name.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return stripped.to_string();
            }
        }
    }
    simple_name.to_string()
}
