use std::collections::HashMap;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::LintError;

/// 扁平化的元素，保留父元素下标
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub parent: Option<usize>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map_or(false, |classes| classes.split_whitespace().any(|c| c == class))
    }
}

/// 解析后的文档，元素按文档顺序排列
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// 解析整页或片段（片段会被补全到 body 中）
    pub fn parse(html: &str) -> Result<Self, LintError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(LintError::Html)?;

        let mut document = Document::default();
        document.collect(&dom.document, None);
        Ok(document)
    }

    // 递归收集元素节点
    fn collect(&mut self, handle: &Handle, parent: Option<usize>) {
        let mut current = parent;

        if let NodeData::Element { ref name, ref attrs, .. } = handle.data {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            self.elements.push(Element {
                tag: name.local.to_string(),
                attrs,
                parent,
            });
            current = Some(self.elements.len() - 1);
        }

        for child in handle.children.borrow().iter() {
            self.collect(child, current);
        }
    }

    pub fn elements(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.elements.iter().enumerate()
    }

    pub fn by_id(&self, id: &str) -> Option<(usize, &Element)> {
        self.elements().find(|(_, element)| element.id() == Some(id))
    }

    pub fn with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = (usize, &'a Element)> + 'a {
        self.elements().filter(move |(_, element)| element.has_class(class))
    }

    pub fn parent(&self, index: usize) -> Option<&Element> {
        self.elements
            .get(index)
            .and_then(|element| element.parent)
            .and_then(|parent| self.elements.get(parent))
    }

    /// `index` 是否位于 `ancestor` 之内
    pub fn is_inside(&self, index: usize, ancestor: usize) -> bool {
        let mut cursor = self.elements.get(index).and_then(|element| element.parent);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.elements.get(current).and_then(|element| element.parent);
        }
        false
    }
}
