//! Typed placeholder records, one per template
//!
//! Each record declares the exact key set of its template. Field names map to
//! manifest keys in SCREAMING_SNAKE_CASE and field order is the key order written
//! to the manifest. Unknown keys are rejected when reading entries back.

use serde::{Deserialize, Serialize};

use super::catalog::TemplateKind;

/// Declares a text-only placeholder record together with its catalog defaults
macro_rules! text_placeholders {
    ($(#[$meta:meta])* $name:ident { $($field:ident = $default:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
        pub struct $name {
            $(pub $field: String),+
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: String::from($default)),+
                }
            }
        }
    };
}

text_placeholders! {
    /// Components, external systems and the flows between them
    ArchitecturePlaceholders {
        system_name = "System Architecture",
        component_1 = "C1",
        component_1_label = "Component 1",
        component_2 = "C2",
        component_2_label = "Component 2",
        component_3 = "C3",
        component_3_label = "Component 3",
        external_1 = "E1",
        external_1_label = "External 1",
        external_2 = "E2",
        external_2_label = "External 2",
        flow_1 = "Input",
        flow_2 = "Process",
        flow_3 = "Output",
        flow_4 = "Feedback",
    }
}

text_placeholders! {
    /// Two-decision process flow
    FlowchartPlaceholders {
        start_label = "Start",
        decision_1 = "Check Condition",
        choice_1_yes = "Proceed",
        choice_1_no = "Retry",
        decision_2 = "Validate",
        choice_2_yes = "Success",
        choice_2_no = "Error",
        action_1 = "Process Data",
        action_2 = "Execute Task",
        action_3 = "Log Result",
        action_4 = "Cleanup",
        end_label = "Complete",
    }
}

text_placeholders! {
    /// Three actors exchanging requests and responses
    SequencePlaceholders {
        actor_1 = "User",
        actor_1_label = "User",
        actor_2 = "System",
        actor_2_label = "System",
        actor_3 = "Service",
        actor_3_label = "Service",
        message_1 = "Request",
        message_2 = "Process",
        message_3 = "Query",
        note_1 = "Processing",
        response_1 = "Data",
        response_2 = "Result",
        response_3 = "Status",
        optional_condition = "If needed",
    }
}

text_placeholders! {
    /// Central concept linked to four related concepts
    ConceptMapPlaceholders {
        central_concept = "Main Idea",
        concept_1 = "Concept A",
        relation_1 = "enables",
        concept_2 = "Concept B",
        relation_2 = "requires",
        concept_3 = "Concept C",
        relation_3 = "supports",
        concept_4 = "Concept D",
        relation_4 = "extends",
        cross_link_label = "relates to",
    }
}

text_placeholders! {
    /// Concentric levels around a central concept
    RadialConceptPlaceholders {
        central_concept = "Core Pattern",
        level_1_label = "Principles",
        level_1_node_1 = "Pragmatism",
        level_1_node_2 = "Human-Centric",
        level_1_node_3 = "Composability",
        level_2_label = "Implementation",
        level_2_node_1 = "File-Based",
        level_2_node_2 = "Tool-Oriented",
        level_2_node_3 = "Example-Driven",
        level_3_label = "Practices",
        level_3_node_1 = "Documentation",
        level_3_node_2 = "Testing",
        level_3_node_3 = "Collaboration",
        level_4_label = "Community",
        level_4_node_1 = "Open Source",
        level_4_node_2 = "Contribution",
        level_4_node_3 = "Evolution",
    }
}

text_placeholders! {
    /// Three phases with two events each
    TimelinePlaceholders {
        timeline_title = "Process Timeline",
        phase_1 = "Phase 1",
        event_1_1 = "Step 1",
        event_1_1_desc = "Initial Setup",
        event_1_2 = "Step 2",
        event_1_2_desc = "Configuration",
        phase_2 = "Phase 2",
        event_2_1 = "Step 3",
        event_2_1_desc = "Implementation",
        event_2_2 = "Step 4",
        event_2_2_desc = "Testing",
        phase_3 = "Phase 3",
        event_3_1 = "Step 5",
        event_3_1_desc = "Deployment",
        event_3_2 = "Step 6",
        event_3_2_desc = "Monitoring",
    }
}

/// Quadrant chart with five plotted items
///
/// Coordinates are fractions of the axis in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct ComparisonPlaceholders {
    pub comparison_title: String,
    pub x_axis_low: String,
    pub x_axis_high: String,
    pub y_axis_low: String,
    pub y_axis_high: String,
    pub quadrant_1_label: String,
    pub quadrant_2_label: String,
    pub quadrant_3_label: String,
    pub quadrant_4_label: String,
    pub item_1: String,
    pub x_1: f64,
    pub y_1: f64,
    pub item_2: String,
    pub x_2: f64,
    pub y_2: f64,
    pub item_3: String,
    pub x_3: f64,
    pub y_3: f64,
    pub item_4: String,
    pub x_4: f64,
    pub y_4: f64,
    pub item_5: String,
    pub x_5: f64,
    pub y_5: f64,
}

impl Default for ComparisonPlaceholders {
    fn default() -> Self {
        Self {
            comparison_title: "System Comparison".into(),
            x_axis_low: "Simple".into(),
            x_axis_high: "Complex".into(),
            y_axis_low: "Manual".into(),
            y_axis_high: "Automated".into(),
            quadrant_1_label: "Ideal Zone".into(),
            quadrant_2_label: "Advanced".into(),
            quadrant_3_label: "Basic".into(),
            quadrant_4_label: "Intermediate".into(),
            item_1: "Option A".into(),
            x_1: 0.3,
            y_1: 0.4,
            item_2: "Option B".into(),
            x_2: 0.6,
            y_2: 0.7,
            item_3: "Option C".into(),
            x_3: 0.8,
            y_3: 0.5,
            item_4: "Option D".into(),
            x_4: 0.4,
            y_4: 0.8,
            item_5: "Option E".into(),
            x_5: 0.2,
            y_5: 0.3,
        }
    }
}

text_placeholders! {
    /// Two options compared across four criteria
    ComparisonTablePlaceholders {
        option_1_title = "Approach A",
        option_2_title = "Approach B",
        option_1_criterion_1 = "Speed: Fast",
        option_2_criterion_1 = "Speed: Moderate",
        option_1_criterion_2 = "Cost: High",
        option_2_criterion_2 = "Cost: Low",
        option_1_criterion_3 = "Complexity: Simple",
        option_2_criterion_3 = "Complexity: Moderate",
        option_1_criterion_4 = "Scalability: Limited",
        option_2_criterion_4 = "Scalability: Excellent",
    }
}

text_placeholders! {
    /// Three sections of scheduled tasks
    GanttPlaceholders {
        chart_title = "Project Timeline",
        section_1_title = "Phase 1",
        task_1_1 = "Task 1",
        task_1_1_id = "t1",
        task_1_1_start = "2024-01-01",
        task_1_1_duration = "2d",
        task_1_2 = "Task 2",
        task_1_2_id = "t2",
        task_1_2_start = "2024-01-03",
        task_1_2_duration = "3d",
        task_1_3 = "Task 3",
        task_1_3_id = "t3",
        task_1_3_start = "2024-01-06",
        task_1_3_duration = "2d",
        section_2_title = "Phase 2",
        task_2_1 = "Task 4",
        task_2_1_id = "t4",
        task_2_1_start = "2024-01-08",
        task_2_1_duration = "4d",
        task_2_2 = "Task 5",
        task_2_2_id = "t5",
        task_2_2_start = "2024-01-12",
        task_2_2_duration = "2d",
        section_3_title = "Phase 3",
        task_3_1 = "Task 6",
        task_3_1_id = "t6",
        task_3_1_start = "2024-01-14",
        task_3_1_duration = "3d",
        task_3_2 = "Task 7",
        task_3_2_id = "t7",
        task_3_2_start = "2024-01-17",
        task_3_2_duration = "2d",
    }
}

text_placeholders! {
    /// Root concept with four branches of three children
    MindmapPlaceholders {
        root_concept = "Central Concept",
        branch_1 = "Branch 1",
        branch_1_child_1 = "Item 1",
        branch_1_child_2 = "Item 2",
        branch_1_child_3 = "Item 3",
        branch_2 = "Branch 2",
        branch_2_child_1 = "Item 4",
        branch_2_child_2 = "Item 5",
        branch_2_child_3 = "Item 6",
        branch_3 = "Branch 3",
        branch_3_child_1 = "Item 7",
        branch_3_child_2 = "Item 8",
        branch_3_child_3 = "Item 9",
        branch_4 = "Branch 4",
        branch_4_child_1 = "Item 10",
        branch_4_child_2 = "Item 11",
        branch_4_child_3 = "Item 12",
    }
}

text_placeholders! {
    /// Three classes and the relationships between them
    ClassDiagramPlaceholders {
        class_1_name = "Agent",
        class_1_attr_1 = "personality",
        class_1_attr_2 = "memory",
        class_1_attr_3 = "skills",
        class_1_method_1 = "process()",
        class_1_method_2 = "respond()",
        class_1_method_3 = "learn()",
        class_2_name = "Skill",
        class_2_attr_1 = "name",
        class_2_attr_2 = "triggers",
        class_2_attr_3 = "guardrails",
        class_2_method_1 = "execute()",
        class_2_method_2 = "validate()",
        class_2_method_3 = "report()",
        class_3_name = "Tool",
        class_3_attr_1 = "type",
        class_3_attr_2 = "policy",
        class_3_attr_3 = "status",
        class_3_method_1 = "invoke()",
        class_3_method_2 = "check()",
        class_3_method_3 = "log()",
        rel_1_type = "composition",
        rel_1_label = "uses",
        rel_2_type = "inheritance",
        rel_2_label = "extends",
        rel_3_type = "association",
        rel_3_label = "interacts",
    }
}

/// A diagram entry as stored in a chapter manifest
///
/// Serializes to `{"template": "<name>", "placeholders": {...}}`. The variant
/// fixes the template and its record fixes the key set, so an entry can never
/// carry a missing or undeclared key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "template", content = "placeholders", rename_all = "kebab-case")]
pub enum Diagram {
    Architecture(ArchitecturePlaceholders),
    Flowchart(FlowchartPlaceholders),
    Sequence(SequencePlaceholders),
    ConceptMap(ConceptMapPlaceholders),
    RadialConcept(RadialConceptPlaceholders),
    Timeline(TimelinePlaceholders),
    Comparison(ComparisonPlaceholders),
    ComparisonTable(ComparisonTablePlaceholders),
    Gantt(GanttPlaceholders),
    Mindmap(MindmapPlaceholders),
    ClassDiagram(ClassDiagramPlaceholders),
}

impl Diagram {
    /// Entry for `kind` filled with the catalog defaults
    pub fn defaults(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Architecture => Diagram::Architecture(Default::default()),
            TemplateKind::Flowchart => Diagram::Flowchart(Default::default()),
            TemplateKind::Sequence => Diagram::Sequence(Default::default()),
            TemplateKind::ConceptMap => Diagram::ConceptMap(Default::default()),
            TemplateKind::RadialConcept => Diagram::RadialConcept(Default::default()),
            TemplateKind::Timeline => Diagram::Timeline(Default::default()),
            TemplateKind::Comparison => Diagram::Comparison(Default::default()),
            TemplateKind::ComparisonTable => Diagram::ComparisonTable(Default::default()),
            TemplateKind::Gantt => Diagram::Gantt(Default::default()),
            TemplateKind::Mindmap => Diagram::Mindmap(Default::default()),
            TemplateKind::ClassDiagram => Diagram::ClassDiagram(Default::default()),
        }
    }

    /// The template this entry instantiates
    pub fn kind(&self) -> TemplateKind {
        match self {
            Diagram::Architecture(_) => TemplateKind::Architecture,
            Diagram::Flowchart(_) => TemplateKind::Flowchart,
            Diagram::Sequence(_) => TemplateKind::Sequence,
            Diagram::ConceptMap(_) => TemplateKind::ConceptMap,
            Diagram::RadialConcept(_) => TemplateKind::RadialConcept,
            Diagram::Timeline(_) => TemplateKind::Timeline,
            Diagram::Comparison(_) => TemplateKind::Comparison,
            Diagram::ComparisonTable(_) => TemplateKind::ComparisonTable,
            Diagram::Gantt(_) => TemplateKind::Gantt,
            Diagram::Mindmap(_) => TemplateKind::Mindmap,
            Diagram::ClassDiagram(_) => TemplateKind::ClassDiagram,
        }
    }

    /// Placeholder values as an ordered JSON object
    pub fn placeholders(&self) -> serde_json::Result<serde_json::Map<String, serde_json::Value>> {
        let entry = serde_json::to_value(self)?;
        Ok(entry
            .get("placeholders")
            .and_then(serde_json::Value::as_object)
            .cloned()
            .unwrap_or_default())
    }
}
