//! Geometry handlers: pure formulas over numeric arguments.

use async_trait::async_trait;

use super::{Handler, HandlerError};
use crate::domain::geometry;
use crate::domain::routing::{ArgValue, Arguments, HandlerName, HandlerOutput};

/// Handler for one geometry formula.
#[derive(Debug, Clone, Copy)]
pub struct GeometryHandler {
    name: HandlerName,
}

impl GeometryHandler {
    /// `None` for retrieval handler names.
    pub fn new(name: HandlerName) -> Option<Self> {
        (!name.is_retrieval()).then_some(Self { name })
    }

    /// One handler per geometry formula.
    pub fn all() -> Vec<Self> {
        HandlerName::ALL.into_iter().filter_map(Self::new).collect()
    }

    /// Reads the declared params in order.
    fn numbers(&self, args: &Arguments) -> Result<Vec<f64>, HandlerError> {
        self.name
            .params()
            .iter()
            .map(|param| match args.get(param) {
                None => Err(HandlerError::missing(self.name, *param)),
                Some(value) => match value.as_number() {
                    Some(n) if n.is_finite() => Ok(n),
                    Some(n) => Err(HandlerError::invalid(
                        self.name,
                        *param,
                        format!("{} is not a finite number", n),
                    )),
                    None => {
                        let shown = match value {
                            ArgValue::Text(s) => format!("{:?} is not a number", s),
                            ArgValue::Number(n) => format!("{} is not a number", n),
                        };
                        Err(HandlerError::invalid(self.name, *param, shown))
                    }
                },
            })
            .collect()
    }

    pub fn compute(&self, args: &Arguments) -> Result<f64, HandlerError> {
        let n = self.numbers(args)?;
        let value = match self.name {
            HandlerName::CircleArea => geometry::circle_area(n[0]),
            HandlerName::RectanglePerimeter => geometry::rectangle_perimeter(n[0], n[1]),
            HandlerName::CubeVolume => geometry::cube_volume(n[0]),
            HandlerName::TriangleArea => geometry::triangle_area(n[0], n[1]),
            HandlerName::WebSearch | HandlerName::VectorSearch => {
                unreachable!("GeometryHandler::new rejects retrieval names")
            }
        };
        if !value.is_finite() {
            return Err(HandlerError::Overflow { handler: self.name });
        }
        Ok(value)
    }
}

#[async_trait]
impl Handler for GeometryHandler {
    fn name(&self) -> HandlerName {
        self.name
    }

    async fn call(&self, args: &Arguments) -> Result<HandlerOutput, HandlerError> {
        self.compute(args).map(HandlerOutput::numeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(name: HandlerName) -> GeometryHandler {
        GeometryHandler::new(name).unwrap()
    }

    #[test]
    fn retrieval_names_are_rejected() {
        assert!(GeometryHandler::new(HandlerName::WebSearch).is_none());
        assert_eq!(GeometryHandler::all().len(), 4);
    }

    #[tokio::test]
    async fn circle_area_output_is_numeric_with_display() {
        let output = handler(HandlerName::CircleArea)
            .call(&Arguments::new().with("radius", 5.0))
            .await
            .unwrap();

        match output {
            HandlerOutput::Numeric { value, display } => {
                assert!((value - 78.53981633974483).abs() < 1e-9);
                assert_eq!(display, "78.5398");
            }
            other => panic!("expected numeric output, got {:?}", other),
        }
    }

    #[test]
    fn params_bind_by_name() {
        let value = handler(HandlerName::TriangleArea)
            .compute(&Arguments::new().with("height", 4.0).with("base", 10.0))
            .unwrap();
        assert_eq!(value, 20.0);
    }

    #[test]
    fn missing_argument_is_reported() {
        let err = handler(HandlerName::RectanglePerimeter)
            .compute(&Arguments::new().with("length", 3.0))
            .unwrap_err();
        assert_eq!(err, HandlerError::missing(HandlerName::RectanglePerimeter, "width"));
    }

    #[test]
    fn non_numeric_argument_is_invalid() {
        let err = handler(HandlerName::CubeVolume)
            .compute(&Arguments::new().with("side", "three"))
            .unwrap_err();
        assert!(matches!(err, HandlerError::InvalidArgument { .. }));
    }

    #[test]
    fn non_finite_argument_is_invalid() {
        let err = handler(HandlerName::CircleArea)
            .compute(&Arguments::new().with("radius", "inf"))
            .unwrap_err();
        assert!(
            matches!(&err, HandlerError::InvalidArgument { name, .. } if name == "radius"),
            "got {:?}",
            err
        );
    }

    #[test]
    fn overflowing_result_is_rejected() {
        let err = handler(HandlerName::CubeVolume)
            .compute(&Arguments::new().with("side", 1e200))
            .unwrap_err();
        assert_eq!(err, HandlerError::Overflow { handler: HandlerName::CubeVolume });
    }

    #[test]
    fn negative_inputs_are_computed_as_given() {
        let value = handler(HandlerName::CubeVolume)
            .compute(&Arguments::new().with("side", -2.0))
            .unwrap();
        assert_eq!(value, -8.0);
    }
}
